use nbayes::config::PipelineConfig;
use nbayes::error::PipelineError;
use nbayes::pipeline::run_classification;

// The classic 14-row play-tennis dataset.
const WEATHER: &str = "\
ID;Outlook;Temperature;Humidity;Wind;Play
1;Sunny;Hot;High;Weak;No
2;Sunny;Hot;High;Strong;No
3;Overcast;Hot;High;Weak;Yes
4;Rain;Mild;High;Weak;Yes
5;Rain;Cool;Normal;Weak;Yes
6;Rain;Cool;Normal;Strong;No
7;Overcast;Cool;Normal;Strong;Yes
8;Sunny;Mild;High;Weak;No
9;Sunny;Cool;Normal;Weak;Yes
10;Rain;Mild;Normal;Weak;Yes
11;Sunny;Mild;Normal;Strong;Yes
12;Overcast;Mild;High;Strong;Yes
13;Overcast;Hot;Normal;Weak;Yes
14;Rain;Mild;High;Strong;No
";

#[test]
fn weather_dataset_runs_end_to_end() {
    let lines = run_classification(WEATHER, &PipelineConfig::default()).unwrap();
    let contains = |needle: &str| lines.iter().any(|line| line.contains(needle));

    // 9 "Yes" instances: round(9 * 0.7) = round(6.3) = 6 to training.
    // 5 "No" instances: round(5 * 0.7) = round(3.5) = 4 (half-to-even).
    assert!(contains("Training instances: 10"));
    assert!(contains("Testing instances: 4"));

    // every stage left its section in the report
    assert!(contains("--- Data Split ---"));
    assert!(contains("--- Prior Probabilities ---"));
    assert!(contains("--- Likelihood Computation (Laplace smoothing) ---"));
    assert!(contains("--- Testing Predictions ---"));
    assert!(contains("--- Evaluation ---"));

    // a likelihood derivation line with the smoothing formula spelled out
    assert!(lines
        .iter()
        .any(|line| line.contains("P('Outlook'=") && line.contains("+ 1) / (")));

    // four scoring breakdowns, one per testing instance
    let breakdowns = lines
        .iter()
        .filter(|line| line.starts_with("Testing instance id:"))
        .count();
    assert_eq!(breakdowns, 4);

    // metric lines with their formulas
    assert!(contains("Accuracy = (correct predictions) / (total testing instances)"));
    assert!(contains("Precision = TP / (TP + FP)"));
    assert!(contains("Recall  = TP / (TP + FN)"));
}

#[test]
fn weather_report_is_byte_identical_across_runs() {
    let first = run_classification(WEATHER, &PipelineConfig::default()).unwrap();
    let second = run_classification(WEATHER, &PipelineConfig::default()).unwrap();
    assert_eq!(first, second);
}

#[test]
fn custom_train_fraction_changes_the_split() {
    let config = PipelineConfig {
        train_fraction: 0.5,
        ..PipelineConfig::default()
    };
    let lines = run_classification(WEATHER, &config).unwrap();
    // round(9 * 0.5) = round(4.5) = 4, round(5 * 0.5) = round(2.5) = 2
    assert!(lines.iter().any(|line| line.contains("Training instances: 6")));
    assert!(lines.iter().any(|line| line.contains("Testing instances: 8")));
}

#[test]
fn fatal_errors_surface_as_single_messages() {
    let config = PipelineConfig::default();

    assert_eq!(
        run_classification("", &config).unwrap_err(),
        PipelineError::EmptyInput
    );
    assert_eq!(
        run_classification("JustOneColumn\n", &config).unwrap_err(),
        PipelineError::Schema { fields: 1 }
    );
    assert_eq!(
        run_classification("ID;Play\n;No\n", &config).unwrap_err(),
        PipelineError::NoValidData
    );
    assert_eq!(
        run_classification("ID;Play\n1;Yes\n2;No\n", &config).unwrap_err(),
        PipelineError::EmptySplit
    );
}
