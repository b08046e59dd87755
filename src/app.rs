//! Command dispatch for the typofix CLI.

use crate::cli::{Cli, Commands};
use crate::config::Config;
use crate::correction::corrector::{SpellCorrector, TrainOptions};
use crate::lang::alphabet::fold_char;
use anyhow::Context;
use clap::CommandFactory;
use clap_complete::Shell;
use std::io::Read;
use std::path::Path;

pub fn run(cli: Cli) -> anyhow::Result<()> {
    let config_path = cli.config.clone().unwrap_or_else(Config::default_path);
    let config = Config::load_or_default(&config_path).with_env_overrides();
    let model_path = cli
        .model
        .clone()
        .or_else(|| config.model.path.clone())
        .unwrap_or_else(Config::default_model_path);

    match cli.command {
        Commands::Train {
            ref corpus,
            ref alphabet,
            ref out,
            target,
        } => {
            let opts = TrainOptions {
                target_broken_percent: target.unwrap_or(config.tuner.target_broken_percent),
                held_out_fraction: config.training.held_out_fraction,
                held_out_cap: config.training.held_out_cap,
                progress: !cli.quiet,
                verbose: cli.verbose > 0 && !cli.quiet,
            };
            let out = out.clone().unwrap_or(model_path);
            train(corpus, alphabet, &out, &opts, cli.quiet)
        }
        Commands::Correct { text, normalized } => {
            correct(&model_path, text.as_deref(), normalized)
        }
        Commands::Suggest { sentence, position } => suggest(&model_path, &sentence, position),
        Commands::Completions { shell } => {
            completions(shell);
            Ok(())
        }
    }
}

fn train(
    corpus: &Path,
    alphabet: &Path,
    out: &Path,
    opts: &TrainOptions,
    quiet: bool,
) -> anyhow::Result<()> {
    if !quiet {
        eprintln!("typofix: training on {}", corpus.display());
    }
    let corrector = SpellCorrector::train(corpus, alphabet, opts)
        .with_context(|| format!("training on '{}' failed", corpus.display()))?;
    corrector
        .save(out)
        .with_context(|| format!("could not write model to '{}'", out.display()))?;
    if !quiet {
        eprintln!(
            "typofix: model written to {} ({} words, penalty {:.2})",
            out.display(),
            corrector.model().word_count(),
            corrector.penalty()
        );
    }
    Ok(())
}

fn load_corrector(model_path: &Path) -> anyhow::Result<SpellCorrector> {
    SpellCorrector::load(model_path).with_context(|| {
        format!(
            "no usable model at '{}'; run `typofix train` first",
            model_path.display()
        )
    })
}

fn correct(model_path: &Path, text: Option<&str>, normalized: bool) -> anyhow::Result<()> {
    let corrector = load_corrector(model_path)?;

    let text = match text {
        Some(text) => text.to_string(),
        None => {
            let mut buffer = String::new();
            std::io::stdin()
                .read_to_string(&mut buffer)
                .context("could not read stdin")?;
            buffer
        }
    };

    let fixed = if normalized {
        corrector.fix_fragment_normalized(&text)
    } else {
        corrector.fix_fragment(&text)
    };
    println!("{fixed}");
    Ok(())
}

fn suggest(model_path: &Path, sentence: &str, position: usize) -> anyhow::Result<()> {
    let corrector = load_corrector(model_path)?;

    // The corrector works on lowercased tokens; fold the way training does.
    let folded: String = sentence.chars().map(fold_char).collect();
    let tokens: Vec<&str> = folded.split_whitespace().collect();
    for candidate in corrector.candidates(&tokens, position) {
        println!("{candidate}");
    }
    Ok(())
}

fn completions(shell: Shell) {
    let mut command = Cli::command();
    clap_complete::generate(shell, &mut command, "typofix", &mut std::io::stdout());
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::path::PathBuf;

    fn train_fixture(dir: &Path) -> PathBuf {
        let corpus = dir.join("corpus.txt");
        let alphabet = dir.join("alphabet.txt");
        let line = "the quick brown fox jumps over the lazy dog.\n";
        fs::write(&corpus, line.repeat(50)).unwrap();
        fs::write(&alphabet, "abcdefghijklmnopqrstuvwxyz").unwrap();

        let out = dir.join("model.bin");
        let opts = TrainOptions::default();
        train(&corpus, &alphabet, &out, &opts, true).unwrap();
        out
    }

    #[test]
    fn train_writes_loadable_model() {
        let dir = tempfile::tempdir().unwrap();
        let model_path = train_fixture(dir.path());
        assert!(model_path.exists());

        let corrector = load_corrector(&model_path).unwrap();
        assert_eq!(
            corrector.fix_fragment("the quikc brown fox"),
            "the quick brown fox"
        );
    }

    #[test]
    fn train_fails_on_missing_corpus() {
        let dir = tempfile::tempdir().unwrap();
        let alphabet = dir.path().join("alphabet.txt");
        fs::write(&alphabet, "abc").unwrap();

        let result = train(
            Path::new("/nonexistent/corpus.txt"),
            &alphabet,
            &dir.path().join("model.bin"),
            &TrainOptions::default(),
            true,
        );
        assert!(result.is_err());
    }

    #[test]
    fn load_corrector_error_mentions_train_hint() {
        let err = load_corrector(Path::new("/nonexistent/model.bin")).unwrap_err();
        assert!(format!("{err:#}").contains("typofix train"));
    }
}
