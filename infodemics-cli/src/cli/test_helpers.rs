//! Small helpers shared across CLI tests.
//!
//! The CLI tests write throwaway node and edge tables and assert the
//! reports or errors that come back.

use std::fs::File;
use std::io::{self, Write};
use std::path::PathBuf;

use tempfile::TempDir;

use super::{Cli, CliError, Execution, NetworkArgs, Report, RunReport, StatsReport, run_cli};

/// `A` carries the claim and sits at the end of the path `A-B-C-D`.
pub(super) const PATH_NODES: &str = "\
id,label,followers
A,5G_Conspiracy_Graph,40
B,Non_Conspiracy_Graph,10
C,Other_Graph,5
D,Non_Conspiracy_Graph,1
";
pub(super) const PATH_EDGES: &str = "source,target\nA,B\nB,C\nC,D\n";

/// `hub` touches every other node; nothing else is connected.
pub(super) const STAR_NODES: &str = "\
id,label,followers
hub,5G_Conspiracy_Graph,900
a,Other_Graph,1
b,Other_Graph,2
c,Non_Conspiracy_Graph,3
d,Other_Graph,4
";
pub(super) const STAR_EDGES: &str = "source,target\nhub,a\nhub,b\nhub,c\nd,hub\n";

pub(super) fn temp_dir() -> TempDir {
    match TempDir::new() {
        Ok(dir) => dir,
        Err(err) => panic!("failed to create temp dir: {err}"),
    }
}

pub(super) fn create_file(dir: &TempDir, name: &str, contents: &str) -> io::Result<PathBuf> {
    let path = dir.path().join(name);
    let mut file = File::create(&path)?;
    file.write_all(contents.as_bytes())?;
    Ok(path)
}

/// Writes `nodes.csv` and `edges.csv` and returns arguments pointing at them.
pub(super) fn network_in(dir: &TempDir, nodes: &str, edges: &str) -> io::Result<NetworkArgs> {
    create_file(dir, "nodes.csv", nodes)?;
    create_file(dir, "edges.csv", edges)?;
    Ok(NetworkArgs {
        data_dir: Some(dir.path().to_path_buf()),
        ..NetworkArgs::default()
    })
}

pub(super) fn run_cli_expecting_error(cli: Cli, panic_msg: &str) -> CliError {
    match run_cli(cli) {
        Ok(_) => panic!("{panic_msg}"),
        Err(err) => err,
    }
}

pub(super) fn expect_run(execution: Execution) -> RunReport {
    match execution.report {
        Report::Run(report) => report,
        Report::Stats(_) => panic!("expected a run report"),
    }
}

pub(super) fn expect_stats(execution: Execution) -> StatsReport {
    match execution.report {
        Report::Stats(report) => report,
        Report::Run(_) => panic!("expected a stats report"),
    }
}
