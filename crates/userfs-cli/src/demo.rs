//! Built-in scenario exercising the namespace end to end.

use std::io::Write;

use anyhow::{bail, ensure, Result};
use tracing::info;
use userfs_core::{FsConfig, FsError, Namespace};

/// Run the scenario against a fresh namespace and print the `/docs` listing.
///
/// Any failed check is returned as an error.
pub fn run<W: Write>(config: FsConfig, out: &mut W) -> Result<()> {
    let mut fs = Namespace::new(config);
    fs.create_user("alice")?;
    fs.create_user("bob")?;

    // World-writable so bob can move his files out later
    fs.mkdir_with_mode("/docs", "alice", 0o777)?;
    fs.write_file("/docs/readme.txt", "alice", "Hello from Alice")?;
    ensure!(
        fs.list_dir("/docs", "alice")? == ["readme.txt"],
        "alice should see exactly readme.txt in /docs"
    );

    match fs.write_file("/docs/readme.txt", "bob", "Bob was here") {
        Err(FsError::PermissionDenied(_)) => {}
        Ok(()) => bail!("bob should not be able to overwrite alice's file"),
        Err(err) => return Err(err.into()),
    }

    fs.chmod("/docs/readme.txt", "alice", 0o644)?;
    ensure!(
        fs.read_file("/docs/readme.txt", "bob")? == b"Hello from Alice",
        "bob should read alice's file once it is world-readable"
    );

    fs.write_file("/docs/todo.txt", "bob", "- buy milk")?;
    ensure!(
        fs.list_dir("/docs", "bob")? == ["readme.txt", "todo.txt"],
        "bob should see both files in /docs"
    );

    fs.mkdir("/bob_files", "bob")?;
    fs.move_node("/docs/todo.txt", "/bob_files/todo.txt", "bob")?;
    ensure!(
        !fs.list_dir("/docs", "alice")?.iter().any(|name| name == "todo.txt"),
        "todo.txt should have left /docs"
    );
    ensure!(
        fs.list_dir("/bob_files", "bob")? == ["todo.txt"],
        "todo.txt should be in /bob_files"
    );
    info!("demo checks passed");

    writeln!(out, "Demo checks passed. Example directory listing (/docs):")?;
    for entry in fs.readdir("/docs", "alice")? {
        let kind = if entry.is_dir() { "dir" } else { "file" };
        writeln!(
            out,
            " - {} ({kind}) owner={} mode={:#o}",
            entry.name, entry.owner, entry.mode
        )?;
    }
    Ok(())
}
