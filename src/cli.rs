//! Command-line interface for typofix
//!
//! Provides argument parsing using clap derive macros.

use clap::{Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;

/// Context-aware statistical spell corrector
#[derive(Parser, Debug)]
#[command(
    name = "typofix",
    version,
    about = "Context-aware statistical spell corrector"
)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Path to configuration file
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Path to the trained model file
    #[arg(long, global = true, value_name = "PATH")]
    pub model: Option<PathBuf>,

    /// Suppress progress output (quiet mode)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Verbose output (corpus statistics, tuner iterations)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Train a language model on a text corpus and calibrate the penalty
    Train {
        /// UTF-8 text corpus to train on
        corpus: PathBuf,

        /// Alphabet file (the letters words may consist of)
        alphabet: PathBuf,

        /// Where to write the model (default: configured model path)
        #[arg(long, value_name = "PATH")]
        out: Option<PathBuf>,

        /// Target fraction of held-out tokens the corrector may change
        #[arg(long, value_name = "FRACTION")]
        target: Option<f64>,
    },

    /// Correct a text fragment (argument, or stdin when omitted)
    Correct {
        /// Text to correct; reads stdin when omitted
        text: Option<String>,

        /// Emit lowercased, space-joined sentences instead of preserving layout
        #[arg(long)]
        normalized: bool,
    },

    /// Show ranked candidates for one position of a sentence
    Suggest {
        /// Sentence (whitespace-separated tokens)
        sentence: String,

        /// Zero-based token position
        position: usize,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        shell: Shell,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_train() {
        let cli = Cli::try_parse_from(["typofix", "train", "corpus.txt", "alphabet.txt"]).unwrap();
        match cli.command {
            Commands::Train {
                corpus,
                alphabet,
                out,
                target,
            } => {
                assert_eq!(corpus, PathBuf::from("corpus.txt"));
                assert_eq!(alphabet, PathBuf::from("alphabet.txt"));
                assert!(out.is_none());
                assert!(target.is_none());
            }
            _ => panic!("Expected Train command"),
        }
    }

    #[test]
    fn test_parse_train_with_options() {
        let cli = Cli::try_parse_from([
            "typofix",
            "train",
            "corpus.txt",
            "alphabet.txt",
            "--out",
            "/tmp/model.bin",
            "--target",
            "0.01",
        ])
        .unwrap();
        match cli.command {
            Commands::Train { out, target, .. } => {
                assert_eq!(out, Some(PathBuf::from("/tmp/model.bin")));
                assert_eq!(target, Some(0.01));
            }
            _ => panic!("Expected Train command"),
        }
    }

    #[test]
    fn test_train_requires_corpus_and_alphabet() {
        let result = Cli::try_parse_from(["typofix", "train", "corpus.txt"]);
        let err = result.unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::MissingRequiredArgument);
    }

    #[test]
    fn test_parse_correct_with_text() {
        let cli = Cli::try_parse_from(["typofix", "correct", "teh quick fox"]).unwrap();
        match cli.command {
            Commands::Correct { text, normalized } => {
                assert_eq!(text.as_deref(), Some("teh quick fox"));
                assert!(!normalized);
            }
            _ => panic!("Expected Correct command"),
        }
    }

    #[test]
    fn test_parse_correct_without_text_reads_stdin() {
        let cli = Cli::try_parse_from(["typofix", "correct"]).unwrap();
        match cli.command {
            Commands::Correct { text, .. } => assert!(text.is_none()),
            _ => panic!("Expected Correct command"),
        }
    }

    #[test]
    fn test_parse_correct_normalized() {
        let cli = Cli::try_parse_from(["typofix", "correct", "--normalized", "text"]).unwrap();
        match cli.command {
            Commands::Correct { normalized, .. } => assert!(normalized),
            _ => panic!("Expected Correct command"),
        }
    }

    #[test]
    fn test_parse_suggest() {
        let cli = Cli::try_parse_from(["typofix", "suggest", "i saw teh cat", "2"]).unwrap();
        match cli.command {
            Commands::Suggest { sentence, position } => {
                assert_eq!(sentence, "i saw teh cat");
                assert_eq!(position, 2);
            }
            _ => panic!("Expected Suggest command"),
        }
    }

    #[test]
    fn test_suggest_requires_position() {
        let result = Cli::try_parse_from(["typofix", "suggest", "i saw teh cat"]);
        let err = result.unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::MissingRequiredArgument);
    }

    #[test]
    fn test_suggest_rejects_non_numeric_position() {
        let result = Cli::try_parse_from(["typofix", "suggest", "sentence", "abc"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_parse_global_config() {
        let cli = Cli::try_parse_from([
            "typofix",
            "correct",
            "text",
            "--config",
            "/path/to/config.toml",
        ])
        .unwrap();
        assert_eq!(cli.config, Some(PathBuf::from("/path/to/config.toml")));
    }

    #[test]
    fn test_parse_global_model() {
        let cli =
            Cli::try_parse_from(["typofix", "correct", "text", "--model", "/tmp/model.bin"])
                .unwrap();
        assert_eq!(cli.model, Some(PathBuf::from("/tmp/model.bin")));
    }

    #[test]
    fn test_parse_global_quiet() {
        let cli = Cli::try_parse_from(["typofix", "--quiet", "correct", "text"]).unwrap();
        assert!(cli.quiet);
    }

    #[test]
    fn test_parse_verbose_levels() {
        let cli = Cli::try_parse_from(["typofix", "correct", "text"]).unwrap();
        assert_eq!(cli.verbose, 0);

        let cli = Cli::try_parse_from(["typofix", "-v", "correct", "text"]).unwrap();
        assert_eq!(cli.verbose, 1);

        let cli = Cli::try_parse_from(["typofix", "-vv", "correct", "text"]).unwrap();
        assert_eq!(cli.verbose, 2);
    }

    #[test]
    fn test_global_options_after_command() {
        let cli =
            Cli::try_parse_from(["typofix", "correct", "text", "--config", "/tmp/c.toml"])
                .unwrap();
        assert_eq!(cli.config, Some(PathBuf::from("/tmp/c.toml")));
    }

    #[test]
    fn test_requires_subcommand() {
        let result = Cli::try_parse_from(["typofix"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_invalid_command_returns_error() {
        let result = Cli::try_parse_from(["typofix", "invalid"]);
        let err = result.unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::InvalidSubcommand);
    }

    #[test]
    fn test_help_flag() {
        let result = Cli::try_parse_from(["typofix", "--help"]);
        assert!(result.is_err());
        let err = result.unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::DisplayHelp);
    }

    #[test]
    fn test_version_flag() {
        let result = Cli::try_parse_from(["typofix", "--version"]);
        assert!(result.is_err());
        let err = result.unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::DisplayVersion);
    }

    #[test]
    fn test_parse_completions() {
        let cli = Cli::try_parse_from(["typofix", "completions", "bash"]).unwrap();
        match cli.command {
            Commands::Completions { shell } => {
                assert_eq!(shell, Shell::Bash);
            }
            _ => panic!("Expected Completions command"),
        }
    }
}
