use std::path::PathBuf;

use clap::Parser;
use enumgen_core::{
    AcceptNaming, DEFAULT_MARKER_CRATE, DEFAULT_OUTPUT, NamingRules, RunConfig, VisitorImplNaming,
    VisitorNaming,
};

/// enumgen - Generate visitors for closed families of Rust types
#[derive(Parser, Debug)]
#[command(name = "enumgen")]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Directory holding the module's source files
    #[arg(long, default_value = ".")]
    pub wd: PathBuf,

    /// Output file name, relative to the working directory
    #[arg(short = 'o', long, default_value = DEFAULT_OUTPUT)]
    pub out: PathBuf,

    /// Visitor naming rule `target:type:method`, e.g. `*Event:*Handler:On*`
    #[arg(long = "visitor", value_delimiter = ',')]
    pub visitors: Vec<VisitorNaming>,

    /// Accept method naming rule `target:method`, e.g. `*Event:Emit`
    #[arg(long = "accept", value_delimiter = ',')]
    pub accepts: Vec<AcceptNaming>,

    /// Generate a closure-backed visitor, `target` or `target:factory`
    #[arg(long = "visitor-impl", value_delimiter = ',')]
    pub visitor_impls: Vec<VisitorImplNaming>,

    /// Crate the member markers are imported from
    #[arg(long, default_value = DEFAULT_MARKER_CRATE)]
    pub marker_crate: String,
}

impl Args {
    /// Convert command-line arguments into a run configuration
    pub fn to_config(&self) -> RunConfig {
        let naming = NamingRules {
            visitors: self.visitors.clone(),
            accepts: self.accepts.clone(),
            visitor_impls: self.visitor_impls.clone(),
        };
        RunConfig::new(&self.wd)
            .with_out(&self.out)
            .with_marker_crate(self.marker_crate.as_str())
            .with_naming(naming)
    }
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use rstest::rstest;

    use super::*;

    fn parse(argv: &[&str]) -> Result<Args, clap::Error> {
        Args::try_parse_from(std::iter::once("enumgen").chain(argv.iter().copied()))
    }

    #[test]
    fn defaults() {
        let config = parse(&[]).unwrap().to_config();
        assert_eq!(config, RunConfig::default());
    }

    #[test]
    fn rules_keep_command_line_order() {
        let args = parse(&[
            "--visitor",
            "*Event:*Handler:On*,*:*Visitor:Visit*",
            "--visitor",
            "Shape:*Walker:Walk*",
            "--accept=*Event:Emit",
            "--visitor-impl",
            "Shape,*Event:Make*",
        ])
        .unwrap();
        let config = args.to_config();

        let targets: Vec<_> = config
            .naming
            .visitors
            .iter()
            .map(|r| r.target.as_str())
            .collect();
        assert_eq!(targets, ["*Event", "*", "Shape"]);
        assert_eq!(config.naming.accepts[0].method_name, "Emit");
        let factories: Vec<_> = config
            .naming
            .visitor_impls
            .iter()
            .map(|r| r.factory_name.as_str())
            .collect();
        assert_eq!(factories, ["New*", "Make*"]);
    }

    #[test]
    fn paths_and_marker_crate() {
        let config = parse(&["--wd", "src/events", "-o", "visitors.rs", "--marker-crate", "markers"])
            .unwrap()
            .to_config();
        assert_eq!(config.output_path(), Path::new("src/events").join("visitors.rs"));
        assert_eq!(config.marker_crate, "markers");
    }

    #[rstest]
    #[case(&["--visitor", "*Event:*Handler"])]
    #[case(&["--accept", "*Event"])]
    #[case(&["--visitor-impl", "a:b:c"])]
    #[case(&["--visitor", "*Event::On*"])]
    fn malformed_rules_are_rejected(#[case] argv: &[&str]) {
        let err = parse(argv).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::ValueValidation);
    }
}
