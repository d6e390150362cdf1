//! CLI argument parsing and command dispatch.
//!
//! Every command loads the snapshot once through a [`TaxonomyContext`] and
//! then runs a read-only query against the resulting store.
//!
//! # Commands
//!
//! - `scheme`: Show the concept scheme and its top concepts
//! - `concepts`: List every concept in snapshot order
//! - `show`: Show one concept with its links
//! - `children`, `parents`, `related`: Resolve one relationship for one concept
//! - `resolve`: Resolve a relationship for a batch of concepts
//! - `descendants`: Flatten the hierarchy below a concept
//! - `tree`: Render the hierarchy below a concept
//! - `check`: Report consistency problems in the snapshot
//!
//! # Global Flags
//!
//! - `--json`: Output in JSON format (applies to all commands)
//! - `--snapshot <PATH>`: Read this snapshot instead of the configured one
//! - `--config <PATH>`: Read configuration from this file instead of `taxon.yaml`
//!
//! # Example
//!
//! ```bash
//! taxon scheme
//! taxon related cs
//! taxon resolve --kind narrower root,cs --mapping
//! taxon --json tree root
//! ```

mod args;
mod execute;
mod validators;

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;

use crate::config::TaxonConfig;
use crate::context::TaxonomyContext;
use crate::output::{OutputConfig, OutputMode};
use crate::resolver::RelationshipKind;
use crate::store::TaxonomyStore;

// Re-export argument structs
pub use args::{ConceptArgs, ExpandArgs, ResolveArgs};

// Re-export validators for external use
pub use validators::{parse_relationship_kind, validate_concept_id};

/// Taxon - query a SKOS taxonomy snapshot
///
/// Loads a taxonomy export (one concept scheme plus its concepts) and answers
/// broader, narrower, and related queries against it.
#[derive(Parser, Debug)]
#[command(name = "taxon")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output in JSON format for programmatic use
    #[arg(long, global = true)]
    pub json: bool,

    /// Path to the taxonomy snapshot (overrides configuration)
    #[arg(long, global = true, value_name = "PATH")]
    pub snapshot: Option<PathBuf>,

    /// Path to a configuration file (defaults to ./taxon.yaml if present)
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Show the concept scheme
    ///
    /// Displays the scheme id and name, the number of concepts, and the
    /// top concepts of the hierarchy.
    Scheme,

    /// List all concepts
    Concepts,

    /// Show one concept with its broader, narrower, and related links
    Show(ConceptArgs),

    /// List the children of a concept
    ///
    /// Children are the concepts that name this concept as broader.
    Children(ConceptArgs),

    /// List the parents of a concept
    ///
    /// Parents are the concepts that name this concept as narrower.
    Parents(ConceptArgs),

    /// List the concepts related to a concept
    Related(ConceptArgs),

    /// Resolve a relationship for several concepts at once
    ///
    /// Results are concatenated in input order. With `--mapping`, each input
    /// is listed with the concepts it produced.
    Resolve(ResolveArgs),

    /// List every concept below a concept, in depth-first order
    ///
    /// Without a concept, expands from all top concepts of the scheme.
    Descendants(ExpandArgs),

    /// Render the hierarchy below a concept as a tree
    ///
    /// Without a concept, renders one tree per top concept of the scheme. A
    /// concept under several top concepts is shown once, under the first,
    /// matching `descendants`.
    Tree(ExpandArgs),

    /// Check the snapshot for consistency problems
    ///
    /// Reports duplicate ids, dangling references, one-sided hierarchy links,
    /// and cycles. Exits with a non-zero status when anything is found.
    Check,
}

impl Cli {
    /// Parse CLI arguments from command line
    pub fn parse_args() -> Self {
        <Self as Parser>::parse()
    }

    /// Parse CLI arguments from an iterator (for testing)
    pub fn try_parse_from<I, T>(iter: I) -> std::result::Result<Self, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        <Self as Parser>::try_parse_from(iter)
    }

    /// Execute the CLI command
    ///
    /// # Errors
    ///
    /// Returns an error if configuration or the snapshot cannot be loaded,
    /// or if the command itself fails.
    pub async fn execute(&self) -> Result<ExitCode> {
        let working_dir = std::env::current_dir()?;
        let snapshot_path = TaxonConfig::resolve_snapshot_path(
            &working_dir,
            self.snapshot.as_deref(),
            self.config.as_deref(),
        )
        .await?;

        let context = TaxonomyContext::new();
        let store = context.load_from_file(&snapshot_path).await?;

        let output_mode = OutputMode::from_json_flag(self.json);
        let output_config = OutputConfig::from_env();

        let stdout = std::io::stdout();
        let mut out = stdout.lock();
        let code = run(&self.command, &store, &mut out, output_mode, &output_config)?;
        out.flush()?;
        Ok(code)
    }
}

/// Run one command against a loaded store.
///
/// # Errors
///
/// Returns an error if the command fails or output cannot be written.
pub fn run<W: Write>(
    command: &Commands,
    store: &TaxonomyStore,
    w: &mut W,
    mode: OutputMode,
    config: &OutputConfig,
) -> Result<ExitCode> {
    match command {
        Commands::Scheme => execute::execute_scheme(w, store, mode, config)?,
        Commands::Concepts => execute::execute_concepts(w, store, mode, config)?,
        Commands::Show(args) => execute::execute_show(w, store, args, mode, config)?,
        Commands::Children(args) => {
            execute::execute_relation(w, store, RelationshipKind::Narrower, args, mode, config)?;
        }
        Commands::Parents(args) => {
            execute::execute_relation(w, store, RelationshipKind::Broader, args, mode, config)?;
        }
        Commands::Related(args) => {
            execute::execute_relation(w, store, RelationshipKind::Related, args, mode, config)?;
        }
        Commands::Resolve(args) => execute::execute_resolve(w, store, args, mode, config)?,
        Commands::Descendants(args) => execute::execute_descendants(w, store, args, mode, config)?,
        Commands::Tree(args) => execute::execute_tree(w, store, args, mode, config)?,
        Commands::Check => return execute::execute_check(w, store, mode, config),
    }
    Ok(ExitCode::SUCCESS)
}

#[cfg(test)]
mod tests {
    use super::*;

    // ========== CLI Parsing Tests ==========

    #[test]
    fn test_parse_requires_command() {
        assert!(Cli::try_parse_from(["taxon"]).is_err());
    }

    #[test]
    fn test_parse_global_flags() {
        let cli = Cli::try_parse_from([
            "taxon",
            "--json",
            "--snapshot",
            "data/taxonomy.json",
            "concepts",
        ])
        .unwrap();

        assert!(cli.json);
        assert_eq!(cli.snapshot, Some(PathBuf::from("data/taxonomy.json")));
        assert!(cli.config.is_none());
        assert!(matches!(cli.command, Commands::Concepts));
    }

    #[test]
    fn test_parse_global_flag_after_subcommand() {
        let cli = Cli::try_parse_from(["taxon", "scheme", "--config", "alt.yaml"]).unwrap();
        assert_eq!(cli.config, Some(PathBuf::from("alt.yaml")));
    }

    #[test]
    fn test_parse_show() {
        let cli = Cli::try_parse_from(["taxon", "show", "cs"]).unwrap();
        match cli.command {
            Commands::Show(args) => assert_eq!(args.concept_id, "cs"),
            _ => panic!("Expected Show command"),
        }
    }

    #[test]
    fn test_parse_show_empty_id() {
        assert!(Cli::try_parse_from(["taxon", "show", "  "]).is_err());
    }

    #[test]
    fn test_parse_resolve_comma_separated() {
        let cli =
            Cli::try_parse_from(["taxon", "resolve", "--kind", "Related", "cs,math"]).unwrap();
        match cli.command {
            Commands::Resolve(args) => {
                assert_eq!(args.kind, RelationshipKind::Related);
                assert_eq!(args.concept_ids, vec!["cs", "math"]);
                assert!(!args.mapping);
            }
            _ => panic!("Expected Resolve command"),
        }
    }

    #[test]
    fn test_parse_resolve_mapping() {
        let cli =
            Cli::try_parse_from(["taxon", "resolve", "-k", "narrower", "root", "cs", "-m"])
                .unwrap();
        match cli.command {
            Commands::Resolve(args) => {
                assert_eq!(args.kind, RelationshipKind::Narrower);
                assert_eq!(args.concept_ids, vec!["root", "cs"]);
                assert!(args.mapping);
            }
            _ => panic!("Expected Resolve command"),
        }
    }

    #[test]
    fn test_parse_resolve_unsupported_kind() {
        let result = Cli::try_parse_from(["taxon", "resolve", "--kind", "exactMatch", "cs"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_parse_resolve_requires_ids() {
        let result = Cli::try_parse_from(["taxon", "resolve", "--kind", "broader"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_parse_tree_default_root() {
        let cli = Cli::try_parse_from(["taxon", "tree"]).unwrap();
        match cli.command {
            Commands::Tree(args) => assert!(args.root.is_none()),
            _ => panic!("Expected Tree command"),
        }
    }

    #[test]
    fn test_parse_descendants_with_root() {
        let cli = Cli::try_parse_from(["taxon", "descendants", "cs"]).unwrap();
        match cli.command {
            Commands::Descendants(args) => assert_eq!(args.root.as_deref(), Some("cs")),
            _ => panic!("Expected Descendants command"),
        }
    }

    // ========== Dispatch Tests ==========

    #[test]
    fn test_run_children_uses_narrower_resolution() {
        use taxon_snapshot::{Concept, ConceptScheme, TaxonomySnapshot};

        let store = TaxonomyStore::new(TaxonomySnapshot::new(
            ConceptScheme::new("S1", "Programs", ["root"]),
            vec![
                Concept::new("root", "Academic Programs").with_narrower(["cs"]),
                Concept::new("cs", "Computer Science").with_broader(["root"]),
            ],
        ));
        let cli = Cli::try_parse_from(["taxon", "children", "root"]).unwrap();
        let mut buf = Vec::new();

        let code = run(
            &cli.command,
            &store,
            &mut buf,
            OutputMode::Text,
            &OutputConfig::new(true, false),
        )
        .unwrap();

        assert_eq!(code, ExitCode::SUCCESS);
        assert_eq!(String::from_utf8(buf).unwrap(), "cs  Computer Science\n");
    }
}
