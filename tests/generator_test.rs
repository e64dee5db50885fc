//! Census driven by an external generator process.
//!
//! Kept in its own test binary: executing a freshly written script races with
//! other test threads forking while the file is still open for writing.

#![cfg(unix)]

mod common;

use common::{cycle, wheel};
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};
use wordrep::archive::read_archive;
use wordrep::census::{run_census, CensusConfig, CensusError, GraphSource};
use wordrep::graph6;

fn script(dir: &Path, name: &str, body: &str) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, format!("#!/bin/sh\n{body}")).unwrap();
    std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755)).unwrap();
    path
}

#[test]
fn generator_output_is_censused() {
    let dir = tempfile::tempdir().unwrap();
    let fake = script(
        dir.path(),
        "fake-geng",
        &format!(
            "[ \"$1\" = \"-c\" ] && [ \"$2\" = \"6\" ] || exit 2\n\
             echo '>A fake-geng -c 6' >&2\n\
             printf '%s\\n' '{}' '{}' '{}'\n",
            graph6::encode(&cycle(6)),
            graph6::encode(&wheel(5)),
            graph6::encode(&wheel(5)),
        ),
    );
    let cfg = CensusConfig {
        source: GraphSource::Geng { program: fake },
        output: dir.path().join("out.zip"),
        ..CensusConfig::new(6)
    };
    let summary = run_census(&cfg).unwrap();
    assert_eq!(summary.total, 3);
    assert_eq!(summary.non_word_representable, 2);
    let names: Vec<_> = read_archive(&summary.archive)
        .unwrap()
        .into_iter()
        .map(|(name, _)| name)
        .collect();
    assert_eq!(names, ["nonWR_1.txt", "nonWR_2.txt"]);

    let failing = script(
        dir.path(),
        "failing-geng",
        &format!("printf '%s\\n' '{}'\nexit 3\n", graph6::encode(&cycle(6))),
    );
    let cfg = CensusConfig {
        source: GraphSource::Geng { program: failing },
        output: dir.path().join("failed.zip"),
        ..CensusConfig::new(6)
    };
    assert!(matches!(run_census(&cfg), Err(CensusError::Generator(_))));
    assert!(!cfg.output.exists());
}
