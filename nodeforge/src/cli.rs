// nodeforge/src/cli.rs
//! Defines the command-line argument structure using clap.
use std::path::PathBuf;

use clap::Parser;
use nodeforge_common::config::DEFAULT_NODE_VERSION;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None, name = "nodeforge", bin_name = "nodeforge")]
pub struct CliArgs {
    /// Final output binary path
    #[arg(short = 'o', value_name = "FILE")]
    pub output: PathBuf,

    /// Scratch workspace for downloads and extracted sources
    #[arg(long, value_name = "DIR", default_value = "./tmp")]
    pub tmpdir: PathBuf,

    /// Root under which the install prefix tree is staged
    #[arg(long, value_name = "DIR", default_value = "./tmp")]
    pub installdir: PathBuf,

    /// Relative prefix passed to the configure step
    #[arg(long, value_name = "NAME", default_value = "install")]
    pub prefix: String,

    /// Log verbosity (case-insensitive)
    #[arg(long, value_name = "LEVEL", default_value = "INFO")]
    pub log: String,

    /// Upstream node release to fetch
    #[arg(long, value_name = "VERSION", default_value = DEFAULT_NODE_VERSION)]
    pub ver: String,

    /// Source file(s); only the first is baked into the runtime
    #[arg(value_name = "FILE")]
    pub files: Vec<PathBuf>,
}

#[cfg(test)]
mod tests {
    use clap::Parser;

    use super::*;

    #[test]
    fn defaults_match_the_documented_surface() {
        let args = CliArgs::try_parse_from(["nodeforge", "-o", "out", "main.js"]).unwrap();
        assert_eq!(args.output, PathBuf::from("out"));
        assert_eq!(args.tmpdir, PathBuf::from("./tmp"));
        assert_eq!(args.installdir, PathBuf::from("./tmp"));
        assert_eq!(args.prefix, "install");
        assert_eq!(args.log, "INFO");
        assert_eq!(args.ver, DEFAULT_NODE_VERSION);
        assert_eq!(args.files, vec![PathBuf::from("main.js")]);
    }

    #[test]
    fn output_path_is_required() {
        assert!(CliArgs::try_parse_from(["nodeforge", "main.js"]).is_err());
    }

    #[test]
    fn positional_files_may_be_empty_at_parse_time() {
        // An empty list is rejected later, through the log, not by clap.
        let args = CliArgs::try_parse_from(["nodeforge", "-o", "out"]).unwrap();
        assert!(args.files.is_empty());
    }

    #[test]
    fn all_pipeline_knobs_are_settable() {
        let args = CliArgs::try_parse_from([
            "nodeforge",
            "-o",
            "/tmp/app",
            "--tmpdir",
            "./scratch",
            "--installdir",
            "./stage",
            "--prefix",
            "opt",
            "--log",
            "debug",
            "--ver",
            "0.10.40",
            "a.js",
            "b.js",
        ])
        .unwrap();
        assert_eq!(args.tmpdir, PathBuf::from("./scratch"));
        assert_eq!(args.installdir, PathBuf::from("./stage"));
        assert_eq!(args.prefix, "opt");
        assert_eq!(args.log, "debug");
        assert_eq!(args.ver, "0.10.40");
        assert_eq!(args.files.len(), 2);
    }
}
