//! Tests for the autoload policy against an in-memory sink.

use anyhow::{Context, Result, ensure};
use rstest::{fixture, rstest};
use test_helpers::ProjectTree;

use super::*;
use crate::MemoryEnv;

#[fixture]
fn tree() -> ProjectTree {
    ProjectTree::new().expect("create project tree")
}

fn bounded(tree: &ProjectTree) -> EnvLocator {
    EnvLocator::builder()
        .boundary(tree.root().as_std_path())
        .build()
}

#[rstest]
fn loads_located_file(tree: ProjectTree) -> Result<()> {
    let file = tree.write(".env", "MYVAR=Donkey\n")?;
    let start = tree.mkdir("src/bin")?;
    let mut env = MemoryEnv::new();

    let outcome = autoload_with(&bounded(&tree), &start, &mut env)?;

    ensure!(outcome.path() == Some(file.as_std_path()), "unexpected {outcome:?}");
    ensure!(env.get("MYVAR").as_deref() == Some("Donkey"), "MYVAR not set");
    Ok(())
}

#[rstest]
fn missing_file_is_not_an_error(tree: ProjectTree) -> Result<()> {
    let start = tree.mkdir("src")?;
    let mut env = MemoryEnv::from_iter([("RENV", "test")]);

    let outcome = autoload_with(&bounded(&tree), &start, &mut env)?;

    ensure!(
        outcome
            == AutoloadOutcome::NotFound {
                file_name: String::from(".env.test"),
            },
        "unexpected {outcome:?}"
    );
    ensure!(env.len() == 1, "sink was modified: {env:?}");
    Ok(())
}

#[rstest]
fn malformed_file_is_fatal(tree: ProjectTree) -> Result<()> {
    tree.write(".env", "FOO=test\nBAR\n")?;
    let mut env = MemoryEnv::new();

    let err = autoload_with(&bounded(&tree), tree.root(), &mut env)
        .err()
        .context("expected an error")?;

    ensure!(
        matches!(err, RenvError::MalformedLine { .. }),
        "unexpected {err:?}"
    );
    ensure!(env.get("FOO").as_deref() == Some("test"), "FOO rolled back");
    Ok(())
}

#[cfg(unix)]
#[rstest]
fn io_failures_are_fatal(tree: ProjectTree) -> Result<()> {
    let start = tree.write("plain_file", "")?;
    let mut env = MemoryEnv::new();

    let result = autoload_with(&bounded(&tree), &start, &mut env);

    ensure!(
        matches!(result, Err(RenvError::Io { .. })),
        "unexpected {result:?}"
    );
    Ok(())
}

#[rstest]
fn missing_start_directory_still_loads_ancestor_file(tree: ProjectTree) -> Result<()> {
    let file = tree.write(".env", "FOUND=yes\n")?;
    let mut env = MemoryEnv::new();

    let outcome = autoload_with(&bounded(&tree), tree.path("not/created"), &mut env)?;

    ensure!(outcome.path() == Some(file.as_std_path()), "unexpected {outcome:?}");
    ensure!(env.get("FOUND").as_deref() == Some("yes"), "FOUND not set");
    Ok(())
}
