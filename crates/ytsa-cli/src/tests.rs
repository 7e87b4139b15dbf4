use super::*;

#[test]
fn parses_analyze_command() {
    let cli = Cli::try_parse_from(["ytsa-cli", "analyze", "dQw4w9WgXcQ"])
        .expect("expected valid cli args");

    assert!(!cli.compact);
    match cli.command {
        Commands::Analyze {
            video_id,
            max_comments,
        } => {
            assert_eq!(video_id, "dQw4w9WgXcQ");
            assert!(max_comments.is_none());
        }
        other => panic!("expected Analyze, got {other:?}"),
    }
}

#[test]
fn parses_analyze_with_limit_and_compact() {
    let cli = Cli::try_parse_from([
        "ytsa-cli",
        "analyze",
        "abc",
        "--max-comments",
        "10",
        "--compact",
    ])
    .expect("expected valid cli args");

    assert!(cli.compact);
    assert!(matches!(
        cli.command,
        Commands::Analyze {
            max_comments: Some(10),
            ..
        }
    ));
}

#[test]
fn analyze_requires_video_id() {
    assert!(Cli::try_parse_from(["ytsa-cli", "analyze"]).is_err());
}

#[test]
fn non_numeric_limit_is_rejected() {
    assert!(Cli::try_parse_from(["ytsa-cli", "analyze", "abc", "--max-comments", "lots"]).is_err());
}

#[test]
fn parses_classify_command() {
    let cli = Cli::try_parse_from(["ytsa-cli", "classify", "I love this"])
        .expect("expected valid cli args");
    assert!(matches!(cli.command, Commands::Classify { ref text } if text == "I love this"));
}

#[test]
fn parses_clean_command() {
    let cli =
        Cli::try_parse_from(["ytsa-cli", "clean", "Hi!"]).expect("expected valid cli args");
    assert!(matches!(cli.command, Commands::Clean { ref text } if text == "Hi!"));
}

#[test]
fn parses_sample_command() {
    let cli = Cli::try_parse_from(["ytsa-cli", "--compact", "sample"])
        .expect("expected valid cli args");
    assert!(cli.compact);
    assert!(matches!(cli.command, Commands::Sample));
}

#[test]
fn missing_command_is_an_error() {
    assert!(Cli::try_parse_from(["ytsa-cli"]).is_err());
}
