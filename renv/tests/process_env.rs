//! `find_env` and `load_env` against the real process environment.

use anyhow::{Context, Result, ensure};
use renv::{RenvError, find_env, load_env};
use rstest::{fixture, rstest};
use serial_test::serial;
use test_helpers::ProjectTree;
use test_helpers::env::{self as test_env, EnvScope};

#[fixture]
fn tree() -> ProjectTree {
    ProjectTree::new().expect("create project tree")
}

/// Clears the control variables and any keys the test's files will set.
fn isolated_with(keys: &[&str]) -> EnvScope {
    let mut scope = test_env::isolated();
    for key in keys {
        scope.push(test_env::remove_var(*key));
    }
    scope
}

#[rstest]
#[serial]
fn find_env_in_start_directory(tree: ProjectTree) -> Result<()> {
    let _scope = isolated_with(&[]);
    let expected = tree.write(".env", "MYVAR=Donkey\n")?;

    let found = find_env(tree.root())?;
    ensure!(found == expected, "expected {expected}, got {}", found.display());
    Ok(())
}

#[rstest]
#[serial]
fn find_env_without_file_reports_not_found(tree: ProjectTree) -> Result<()> {
    let _scope = isolated_with(&[]);

    let err = find_env(tree.root()).err().context("expected an error")?;
    ensure!(err.is_not_found(), "unexpected {err:?}");
    ensure!(err.to_string() == ".env not found in project", "message: {err}");
    Ok(())
}

#[rstest]
#[serial]
fn find_env_reads_selector_and_boundary_from_process(tree: ProjectTree) -> Result<()> {
    let mut scope = isolated_with(&[]);
    scope.push(test_env::set_var("RENV", "test"));
    scope.push(test_env::set_var("RENV_ROOT", tree.root()));
    tree.write(".env", "DEV=1\n")?;
    let expected = tree.write(".env.test", "TEST=1\n")?;
    let start = tree.mkdir("crates/app/src")?;

    let found = find_env(&start)?;
    ensure!(found == expected, "expected {expected}, got {}", found.display());
    Ok(())
}

#[rstest]
#[serial]
fn development_selector_uses_base_file(tree: ProjectTree) -> Result<()> {
    let mut scope = isolated_with(&[]);
    scope.push(test_env::set_var("RENV", "development"));
    let expected = tree.write(".env", "DEV=1\n")?;
    tree.write(".env.development", "UNUSED=1\n")?;

    let found = find_env(tree.root())?;
    ensure!(found == expected, "expected {expected}, got {}", found.display());
    Ok(())
}

#[rstest]
#[serial]
fn load_env_sets_process_variables(tree: ProjectTree) -> Result<()> {
    let _scope = isolated_with(&["RENV_IT_MYVAR", "RENV_IT_BAR"]);
    let file = tree.write(".env", "  RENV_IT_MYVAR = Donkey  \n#RENV_IT_BAR=var\n")?;

    load_env(&file)?;

    ensure!(
        std::env::var("RENV_IT_MYVAR").as_deref() == Ok("Donkey"),
        "RENV_IT_MYVAR not set"
    );
    ensure!(
        std::env::var("RENV_IT_BAR").is_err(),
        "commented variable was set"
    );
    Ok(())
}

#[rstest]
#[serial]
fn load_env_overwrites_existing_values(tree: ProjectTree) -> Result<()> {
    let mut scope = isolated_with(&[]);
    scope.push(test_env::set_var("RENV_IT_PORT", "3000"));
    let file = tree.write(".env", "RENV_IT_PORT=8080\n")?;

    load_env(&file)?;

    ensure!(
        std::env::var("RENV_IT_PORT").as_deref() == Ok("8080"),
        "RENV_IT_PORT not overwritten"
    );
    Ok(())
}

#[rstest]
#[serial]
fn load_env_failure_keeps_earlier_variables(tree: ProjectTree) -> Result<()> {
    let _scope = isolated_with(&["RENV_IT_FOO", "RENV_IT_BAZ"]);
    let file = tree.write(".env", "RENV_IT_FOO=test\nRENV_IT_BAR\nRENV_IT_BAZ=1\n")?;

    let err = load_env(&file).err().context("expected an error")?;

    ensure!(
        matches!(err, RenvError::MalformedLine { .. }),
        "unexpected {err:?}"
    );
    ensure!(err.to_string().contains("RENV_IT_BAR"), "message: {err}");
    ensure!(
        std::env::var("RENV_IT_FOO").as_deref() == Ok("test"),
        "earlier assignment rolled back"
    );
    ensure!(
        std::env::var("RENV_IT_BAZ").is_err(),
        "assignment after failure applied"
    );
    Ok(())
}

#[rstest]
#[serial]
fn find_then_load_round_trip(tree: ProjectTree) -> Result<()> {
    let mut scope = isolated_with(&["RENV_IT_DATABASE_URL"]);
    scope.push(test_env::set_var("RENV_ROOT", tree.root()));
    tree.write(".env", "RENV_IT_DATABASE_URL=postgres://localhost/dev?ssl=off\n")?;
    let start = tree.mkdir("service/src")?;

    let path = find_env(&start)?;
    load_env(&path)?;
    load_env(&path)?;

    ensure!(
        std::env::var("RENV_IT_DATABASE_URL").as_deref()
            == Ok("postgres://localhost/dev?ssl=off"),
        "value split on the wrong '='"
    );
    Ok(())
}
