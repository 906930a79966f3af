//! `recite-score`: score recognized text against a reference and print the result as JSON

use std::path::PathBuf;

use clap::Parser;
use iqra_core::logging::init_tracing_from_env;
use iqra_core::{RecitationError, ScoreResult, Scorer, ScoringConfig};

#[derive(Parser, Debug)]
#[command(
    name = "recite-score",
    version,
    about = "Score recognized recitation text against a reference text"
)]
struct Cli {
    /// Reference text
    #[arg(long, conflicts_with = "expected_file")]
    expected: Option<String>,
    /// File holding the reference text
    #[arg(long, value_name = "PATH")]
    expected_file: Option<PathBuf>,
    /// Recognized text
    #[arg(long, conflicts_with = "actual_file")]
    actual: Option<String>,
    /// File holding the recognized text
    #[arg(long, value_name = "PATH")]
    actual_file: Option<PathBuf>,
    /// JSON scoring config
    #[arg(long, value_name = "PATH", env = "IQRA_SCORING_CONFIG")]
    config: Option<PathBuf>,
    /// Enable the popular-element heuristic for long texts (env: IQRA_AUTOJUNK)
    #[arg(long, env = "IQRA_AUTOJUNK")]
    autojunk: bool,
    /// Pretty-print the JSON result
    #[arg(long)]
    pretty: bool,
}

fn read_text(
    inline: Option<String>,
    path: Option<PathBuf>,
    context: &'static str,
) -> Result<String, RecitationError> {
    match (inline, path) {
        (Some(text), _) => Ok(text),
        (None, Some(path)) => {
            std::fs::read_to_string(&path).map_err(|e| RecitationError::io(context, e))
        }
        (None, None) => Ok(String::new()),
    }
}

fn build_config(cli: &Cli) -> Result<ScoringConfig, RecitationError> {
    let mut config = match &cli.config {
        Some(path) => ScoringConfig::load(path)?,
        None => ScoringConfig::default(),
    };
    if cli.autojunk {
        config.autojunk = true;
        config.validate()?;
    }
    Ok(config)
}

fn score_inputs(cli: Cli) -> Result<ScoreResult, RecitationError> {
    let config = build_config(&cli)?;
    let expected = read_text(cli.expected, cli.expected_file, "read expected text")?;
    let actual = read_text(cli.actual, cli.actual_file, "read recognized text")?;
    if expected.trim().is_empty() {
        tracing::warn!("reference text is empty; score will be 0");
    }

    let result = Scorer::new(config).score_recitation(&expected, &actual);
    tracing::info!(
        score = result.score,
        flags = result.tajweed_flags.len(),
        "recitation scored"
    );
    Ok(result)
}

fn run(cli: Cli) -> Result<(), RecitationError> {
    let pretty = cli.pretty;
    let result = score_inputs(cli)?;

    let json = if pretty {
        serde_json::to_string_pretty(&result)
    } else {
        serde_json::to_string(&result)
    }
    .map_err(|e| RecitationError::json("serialize score result", e))?;
    println!("{json}");
    Ok(())
}

fn main() {
    init_tracing_from_env();
    let cli = Cli::parse();
    if let Err(err) = run(cli) {
        tracing::error!(error = %err, "recite-score failed");
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("recite-score").chain(args.iter().copied())).unwrap()
    }

    fn temp_file(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn read_text_prefers_inline_text() {
        let file = temp_file("from file");
        let text = read_text(
            Some("inline".to_string()),
            Some(file.path().to_path_buf()),
            "read expected text",
        )
        .unwrap();
        assert_eq!(text, "inline");
    }

    #[test]
    fn read_text_falls_back_to_file_then_empty() {
        let file = temp_file("بسم الله");
        let text = read_text(None, Some(file.path().to_path_buf()), "read expected text").unwrap();
        assert_eq!(text, "بسم الله");
        assert_eq!(read_text(None, None, "read expected text").unwrap(), "");
    }

    #[test]
    fn read_text_reports_missing_file() {
        let err = read_text(
            None,
            Some(PathBuf::from("/nonexistent/recitation.txt")),
            "read recognized text",
        )
        .unwrap_err();
        assert!(matches!(
            err,
            RecitationError::Io { context: "read recognized text", .. }
        ));
    }

    #[test]
    fn inline_and_file_inputs_conflict() {
        let result = Cli::try_parse_from([
            "recite-score",
            "--expected",
            "x",
            "--expected-file",
            "y.txt",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn autojunk_flag_overrides_config_and_is_validated() {
        let file = temp_file(r#"{"autojunk": false, "autojunk_min_len": 0}"#);
        let path = file.path().to_str().unwrap();

        // Valid as loaded, since autojunk is off
        let cli = parse(&["--config", path]);
        assert!(!build_config(&cli).unwrap().autojunk);

        let cli = parse(&["--config", path, "--autojunk"]);
        assert!(matches!(
            build_config(&cli),
            Err(RecitationError::Config { field: "autojunk_min_len", .. })
        ));
        assert!(score_inputs(cli).is_err());

        let cli = parse(&["--autojunk"]);
        let config = build_config(&cli).unwrap();
        assert!(config.autojunk);
        assert_eq!(config.autojunk_min_len, ScoringConfig::DEFAULT_AUTOJUNK_MIN_LEN);
    }

    #[test]
    fn scores_inline_inputs() {
        let cli = parse(&["--expected", "بِسْمِ اللَّهِ", "--actual", "بسم الله"]);
        let result = score_inputs(cli).unwrap();
        assert_eq!(result.score, 100.0);
        assert_eq!(result.diffs.len(), 1);
    }

    #[test]
    fn empty_reference_still_scores() {
        let cli = parse(&["--actual", "بسم الله"]);
        let result = score_inputs(cli).unwrap();
        assert_eq!(result.score, 0.0);
        assert!(result.tajweed_flags.is_empty());
    }
}
