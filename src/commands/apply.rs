//! Apply tag directives to a target

use colored::Colorize;
use tracing::debug;

use crate::cli::Cli;
use crate::config::GotagConfig;
use crate::directives::ResolveOptions;
use crate::processor::{FileProcessor, ProcessSummary};
use crate::target::Target;
use crate::ui::Prompt;
use crate::GotagError;

type Result<T> = std::result::Result<T, GotagError>;

/// Execute a run: resolve the target, then rewrite every matching file
///
/// CLI flags take precedence over `config`: `--case` replaces the configured
/// case style, `--recursive` and `--quiet` are OR-ed with their settings.
/// Per-file failures are collected in the returned summary.
///
/// # Errors
/// Returns `GotagError` if no target is given, the target or a directive is
/// invalid, or a directory cannot be traversed. No file is touched in any of
/// these cases.
pub fn execute(cli: &Cli, config: &GotagConfig, prompt: &mut dyn Prompt) -> Result<ProcessSummary> {
    let Some(input) = cli.target.as_deref() else {
        return Err(GotagError::InvalidInput(
            "No target provided (use -t/--target)".into(),
        ));
    };

    let target = Target::parse(input)?;
    let directives = cli.directives()?;
    let quiet = cli.quiet || config.quiet;
    let files = target.files(cli.recursive || config.recursive)?;

    if directives.is_empty() {
        if !quiet {
            println!(
                "{}",
                "No directives given (use --add, --delete or --overwrite); nothing to do.".yellow()
            );
        }
        return Ok(ProcessSummary::new());
    }

    let options = ResolveOptions::new(cli.case_style.unwrap_or(config.case_style), cli.policy());
    debug!(files = files.len(), ?options, "resolved target");

    let processor = FileProcessor::new(&directives, options).with_dry_run(cli.dry_run);
    let summary = processor.process_all(&files, target.type_filter(), prompt, quiet);

    if !quiet {
        summary.print(cli.dry_run);
    }
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::target::TargetError;
    use crate::testing::write_go_file;
    use crate::ui::ScriptedPrompt;
    use std::fs;
    use tempfile::TempDir;

    const USER: &str = "package model\n\ntype User struct {\n\tUserID int\n}\n";

    fn cli_for(target: &str) -> Cli {
        Cli {
            target: Some(target.to_string()),
            add: vec!["json".to_string()],
            quiet: true,
            ..Cli::default()
        }
    }

    #[test]
    fn test_missing_target_is_rejected() {
        let cli = Cli {
            target: None,
            ..cli_for("")
        };
        let result = execute(&cli, &GotagConfig::default(), &mut ScriptedPrompt::closed());
        assert!(matches!(result, Err(GotagError::InvalidInput(_))));
    }

    #[test]
    fn test_invalid_directive_touches_nothing() {
        let dir = TempDir::new().unwrap();
        let path = write_go_file(dir.path(), "user.go", USER);
        let cli = Cli {
            add: vec!["bad key".to_string()],
            ..cli_for(path.to_str().unwrap())
        };

        let result = execute(&cli, &GotagConfig::default(), &mut ScriptedPrompt::closed());
        assert!(matches!(result, Err(GotagError::Directive(_))));
        assert_eq!(fs::read_to_string(&path).unwrap(), USER);
    }

    #[test]
    fn test_missing_file_target() {
        let dir = TempDir::new().unwrap();
        let cli = cli_for(dir.path().join("nope.go").to_str().unwrap());
        let result = execute(&cli, &GotagConfig::default(), &mut ScriptedPrompt::closed());
        assert!(matches!(
            result,
            Err(GotagError::Target(TargetError::NotFound(_)))
        ));
    }

    #[test]
    fn test_config_case_style_applies() {
        let dir = TempDir::new().unwrap();
        let path = write_go_file(dir.path(), "user.go", USER);
        let config = GotagConfig {
            case_style: crate::case::CaseStyle::Snake,
            ..GotagConfig::default()
        };

        let summary = execute(&cli_for(path.to_str().unwrap()), &config, &mut ScriptedPrompt::closed()).unwrap();
        assert_eq!(summary.updated, 1);
        assert!(fs::read_to_string(&path).unwrap().contains("`json:\"user_id\"`"));
    }

    #[test]
    fn test_cli_case_overrides_config() {
        let dir = TempDir::new().unwrap();
        let path = write_go_file(dir.path(), "user.go", USER);
        let config = GotagConfig {
            case_style: crate::case::CaseStyle::Snake,
            ..GotagConfig::default()
        };
        let cli = Cli {
            case_style: Some(crate::case::CaseStyle::Kebab),
            ..cli_for(path.to_str().unwrap())
        };

        execute(&cli, &config, &mut ScriptedPrompt::closed()).unwrap();
        assert!(fs::read_to_string(&path).unwrap().contains("`json:\"user-id\"`"));
    }

    #[test]
    fn test_no_directives_is_a_no_op() {
        let dir = TempDir::new().unwrap();
        let path = write_go_file(dir.path(), "user.go", USER);
        let cli = Cli {
            add: Vec::new(),
            ..cli_for(path.to_str().unwrap())
        };

        let summary = execute(&cli, &GotagConfig::default(), &mut ScriptedPrompt::closed()).unwrap();
        assert_eq!(summary.files(), 0);
        assert_eq!(fs::read_to_string(&path).unwrap(), USER);
    }
}
