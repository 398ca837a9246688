//! The async entry point must behave exactly like the blocking one

use anyhow::Result;
use browser_deps_lib::{BrowserDeps, OutputKind, ResolveError, ResolveOptions, resolve, resolve_async};
use browser_deps_tests::FixtureTree;

#[tokio::test]
async fn test_async_matches_blocking_resolution() -> Result<()> {
    let tree = FixtureTree::new()?;
    tree.activate("explicit-deps")?;

    let options = ResolveOptions::default();
    let blocking = resolve(tree.root(), &options)?;
    let non_blocking = resolve_async(tree.root().to_path_buf(), options).await?;

    assert_eq!(blocking, non_blocking);
    Ok(())
}

#[tokio::test]
async fn test_async_environment_and_style() -> Result<()> {
    let tree = FixtureTree::new()?;
    tree.activate("overrides-env")?;

    let options = ResolveOptions::new(OutputKind::Main).with_environment("prod");
    let resolution = BrowserDeps::new()
        .run_async(tree.root().to_path_buf(), options)
        .await?;

    assert_eq!(
        resolution.files,
        vec![tree.module_file("simple", "simple-overridden.js")]
    );
    assert_eq!(resolution.environment.as_deref(), Some("prod"));
    Ok(())
}

#[tokio::test]
async fn test_async_propagates_errors() -> Result<()> {
    let tree = FixtureTree::new()?;
    tree.activate("nothing")?;

    let err = resolve_async(tree.root().to_path_buf(), ResolveOptions::default())
        .await
        .unwrap_err();
    assert!(matches!(err, ResolveError::ModuleNotFound { .. }));
    Ok(())
}
