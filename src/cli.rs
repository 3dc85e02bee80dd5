use crate::exclusion::MatcherKind;
use crate::identity::IdentityScope;
use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "naa-triage",
    version,
    about = "Processes Network Access Analyzer findings into CSV and a findings sink",
    long_about = "naa-triage normalizes Network Access Analyzer reachability findings, drops \
                  previously reviewed findings via an exclusion list, and emits the rest to a \
                  CSV file and a Security Hub shaped findings feed."
)]
pub struct Cli {
    /// Network Access Analyzer export (JSON) to process
    #[arg(short, long)]
    pub input: PathBuf,

    /// CSV destination; appended to when it already exists
    #[arg(short, long)]
    pub output: PathBuf,

    /// Exclusion list (headerless CSV); omit to process every finding
    #[arg(short, long)]
    pub exclusions: Option<PathBuf>,

    /// Exclusion matching variant (must match the exclusion file's arity)
    #[arg(short, long, value_enum, default_value_t = MatcherKind::Exact)]
    pub matcher: MatcherKind,

    /// Identity scope used for the external finding id
    #[arg(long, value_enum, default_value_t = IdentityScope::Rule)]
    pub scope: IdentityScope,

    /// Do not write CSV rows
    #[arg(long)]
    pub skip_csv: bool,

    /// Do not emit findings to the sink
    #[arg(long)]
    pub skip_import: bool,

    /// Destination for shaped findings payloads (JSON lines)
    #[arg(long, default_value = "naa-findings.jsonl")]
    pub findings_out: PathBuf,

    /// Verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_required_args() {
        let cli =
            Cli::try_parse_from(["naa-triage", "-i", "report.json", "-o", "out.csv"]).unwrap();
        assert_eq!(cli.input, PathBuf::from("report.json"));
        assert_eq!(cli.output, PathBuf::from("out.csv"));
        assert!(cli.exclusions.is_none());
        assert!(!cli.skip_csv);
        assert!(!cli.skip_import);
    }

    #[test]
    fn test_parse_missing_input_fails() {
        assert!(Cli::try_parse_from(["naa-triage", "-o", "out.csv"]).is_err());
    }

    #[test]
    fn test_parse_exclusions() {
        let cli = Cli::try_parse_from([
            "naa-triage",
            "-i",
            "report.json",
            "-o",
            "out.csv",
            "-e",
            "exclusions.csv",
        ])
        .unwrap();
        assert_eq!(cli.exclusions, Some(PathBuf::from("exclusions.csv")));
    }

    #[test]
    fn test_default_matcher_is_exact() {
        let cli =
            Cli::try_parse_from(["naa-triage", "-i", "report.json", "-o", "out.csv"]).unwrap();
        assert_eq!(cli.matcher, MatcherKind::Exact);
    }

    #[test]
    fn test_parse_matcher_legacy() {
        let cli = Cli::try_parse_from([
            "naa-triage",
            "-i",
            "report.json",
            "-o",
            "out.csv",
            "--matcher",
            "legacy",
        ])
        .unwrap();
        assert_eq!(cli.matcher, MatcherKind::Legacy);
    }

    #[test]
    fn test_parse_matcher_load_balancer() {
        let cli = Cli::try_parse_from([
            "naa-triage",
            "-i",
            "report.json",
            "-o",
            "out.csv",
            "--matcher",
            "load-balancer",
        ])
        .unwrap();
        assert_eq!(cli.matcher, MatcherKind::LoadBalancer);
    }

    #[test]
    fn test_default_scope_is_rule() {
        let cli =
            Cli::try_parse_from(["naa-triage", "-i", "report.json", "-o", "out.csv"]).unwrap();
        assert_eq!(cli.scope, IdentityScope::Rule);
    }

    #[test]
    fn test_parse_scope_instance() {
        let cli = Cli::try_parse_from([
            "naa-triage",
            "-i",
            "report.json",
            "-o",
            "out.csv",
            "--scope",
            "instance",
        ])
        .unwrap();
        assert_eq!(cli.scope, IdentityScope::Instance);
    }

    #[test]
    fn test_parse_skip_flags() {
        let cli = Cli::try_parse_from([
            "naa-triage",
            "-i",
            "report.json",
            "-o",
            "out.csv",
            "--skip-csv",
            "--skip-import",
        ])
        .unwrap();
        assert!(cli.skip_csv);
        assert!(cli.skip_import);
    }

    #[test]
    fn test_parse_findings_out_default() {
        let cli =
            Cli::try_parse_from(["naa-triage", "-i", "report.json", "-o", "out.csv"]).unwrap();
        assert_eq!(cli.findings_out, PathBuf::from("naa-findings.jsonl"));
    }

    #[test]
    fn test_parse_verbose() {
        let cli =
            Cli::try_parse_from(["naa-triage", "-i", "report.json", "-o", "out.csv", "-v"])
                .unwrap();
        assert!(cli.verbose);
    }
}
