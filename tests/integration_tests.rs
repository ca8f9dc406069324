use gss_dashboard::PipelineError;
use gss_dashboard::analyzers::types::{BinnedRow, CountRow};
use gss_dashboard::analyzers::{
    JobPrestigeCategory, bin_by_prestige, breadwinner_counts, summarize_by_sex,
};
use gss_dashboard::dashboard::{Dashboard, Views};
use gss_dashboard::load::load;
use gss_dashboard::output::write_all;
use gss_dashboard::survey::{AGE_SENTINEL, CleanedTable, clean};

const FIXTURE: &str = "tests/fixtures/gss_sample.csv";

async fn cleaned_fixture() -> CleanedTable {
    let raw = load(FIXTURE).await.expect("Failed to load fixture");
    clean(&raw).expect("Failed to clean fixture")
}

#[tokio::test]
async fn test_load_and_clean_fixture() {
    let raw = load(FIXTURE).await.unwrap();
    assert_eq!(raw.len(), 8);
    assert!(
        raw.rows()
            .iter()
            .flatten()
            .flatten()
            .any(|cell| cell.contains('\u{2019}'))
    );

    let cleaned = clean(&raw).unwrap();
    assert_eq!(cleaned.len(), 8);

    let first = &cleaned.records()[0];
    assert_eq!(first.age, Some(89.0));
    assert_eq!(first.income, Some(50000.0));
    assert_eq!(first.job_prestige, Some(45.0));

    let last = &cleaned.records()[7];
    assert_eq!(last.age, None);
    assert_eq!(last.men_overwork, None);
    assert_eq!(last.mother_job_prestige, None);

    assert_eq!(cleaned.records()[2].income, None);
    assert_eq!(cleaned.records()[2].male_breadwinner, None);
    assert_eq!(cleaned.records()[4].men_bettersuited, None);
}

#[tokio::test]
async fn test_ages_numeric_after_clean() {
    let cleaned = cleaned_fixture().await;
    let raw_again = cleaned.to_raw();
    let age_col = raw_again.column_index("age").unwrap();

    assert!(
        raw_again
            .rows()
            .iter()
            .all(|row| row[age_col].as_deref() != Some(AGE_SENTINEL))
    );
    assert!(cleaned.iter().all(|r| r.age.is_none_or(|a| a >= 0.0)));
}

#[tokio::test]
async fn test_clean_twice_is_noop() {
    let cleaned = cleaned_fixture().await;
    assert_eq!(clean(&cleaned.to_raw()).unwrap(), cleaned);
}

#[tokio::test]
async fn test_summary_by_sex() {
    let cleaned = cleaned_fixture().await;
    let summary = summarize_by_sex(&cleaned).unwrap();

    assert_eq!(summary.len(), 2);

    let female = &summary[0];
    assert_eq!(female.gender, "female");
    assert_eq!(female.avg_income, Some(45333.33));
    assert_eq!(female.avg_job_prestige, Some(38.75));
    assert_eq!(female.avg_socioeconomic_index, Some(38.88));
    assert_eq!(female.avg_education, Some(14.0));

    let male = &summary[1];
    assert_eq!(male.gender, "male");
    assert_eq!(male.avg_income, Some(41750.0));
    assert_eq!(male.avg_job_prestige, Some(46.67));
    assert_eq!(male.avg_socioeconomic_index, Some(44.0));
    assert_eq!(male.avg_education, Some(14.0));
}

#[tokio::test]
async fn test_breadwinner_counts_sum_to_answers() {
    let cleaned = cleaned_fixture().await;
    let counts = breadwinner_counts(&cleaned).unwrap();

    let answered = cleaned
        .iter()
        .filter(|r| r.male_breadwinner.is_some())
        .count();
    assert_eq!(counts.iter().map(|c| c.count).sum::<usize>(), answered);
    assert_eq!(answered, 6);

    assert_eq!(
        counts[3],
        CountRow {
            sex: "male".into(),
            male_breadwinner: "Disagree".into(),
            count: 2,
        }
    );
}

#[tokio::test]
async fn test_prestige_bins() {
    let cleaned = cleaned_fixture().await;
    let binned = bin_by_prestige(&cleaned).unwrap();

    assert_eq!(
        binned[0],
        BinnedRow {
            income: 50000.0,
            sex: "male".into(),
            job_prestige: 45.0,
            jp_cat: JobPrestigeCategory::Medium,
        }
    );

    let cats: Vec<_> = binned.iter().map(|r| r.jp_cat).collect();
    assert_eq!(
        cats,
        vec![
            JobPrestigeCategory::Medium,
            JobPrestigeCategory::Low,
            JobPrestigeCategory::Premium,
            JobPrestigeCategory::High,
            JobPrestigeCategory::VeryLow,
        ]
    );
    assert!(
        binned
            .iter()
            .all(|r| r.job_prestige > 15.9 && r.job_prestige <= 82.9)
    );
}

#[tokio::test]
async fn test_build_writes_outputs() {
    let cleaned = cleaned_fixture().await;
    let views = Views::compute(&cleaned).unwrap();
    let dashboard = Dashboard::from_views(&views);

    let dir = std::env::temp_dir().join("gss_dashboard_integration_out");
    let _ = std::fs::remove_dir_all(&dir);
    write_all(&dir, &cleaned, &views, &dashboard).unwrap();

    let summary = std::fs::read_to_string(dir.join("summary_by_sex.csv")).unwrap();
    assert!(summary.starts_with(
        "Gender,Avg. Income,Avg. Job Prestige,Avg. Socioeconomic Index,Avg. Years of Education"
    ));

    let bins = std::fs::read_to_string(dir.join("prestige_bins.csv")).unwrap();
    assert!(bins.contains("male,45.0,Medium"));

    let json: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(dir.join("dashboard.json")).unwrap())
            .unwrap();
    assert_eq!(json["sections"].as_array().unwrap().len(), 6);

    std::fs::remove_dir_all(&dir).unwrap();
}

#[tokio::test]
async fn test_missing_source_is_unavailable() {
    let err = load("tests/fixtures/missing.csv").await.unwrap_err();
    assert!(matches!(err, PipelineError::DataUnavailable { .. }));
}
