use std::fs;
use std::path::Path;

const SITE_PKG_DIR: &str = "target/site/pkg";
const OUTPUT_NAME: &str = "trail-loader";

fn copy_if_present(source: &Path, dest: &Path) {
    if !source.exists() {
        println!("Skipping {source:?}: not found");
        return;
    }
    match fs::copy(source, dest) {
        Ok(_) => println!("Copied {source:?} to {dest:?}"),
        Err(e) => println!("cargo:warning=Failed to copy {source:?}: {e}"),
    }
}

/// cargo-leptos writes `<name>.wasm` but the generated JS loads `<name>_bg.wasm`.
fn link_wasm(pkg_dir: &Path) {
    let link = pkg_dir.join(format!("{OUTPUT_NAME}_bg.wasm"));
    let target = format!("{OUTPUT_NAME}.wasm");

    if link.symlink_metadata().is_ok() {
        if let Err(e) = fs::remove_file(&link) {
            println!("cargo:warning=Failed to remove stale {link:?}: {e}");
            return;
        }
    }

    #[cfg(unix)]
    let linked = std::os::unix::fs::symlink(&target, &link);
    #[cfg(windows)]
    let linked = std::os::windows::fs::symlink_file(&target, &link);

    match linked {
        Ok(()) => println!("Linked {link:?} -> {target}"),
        Err(e) => println!("cargo:warning=Failed to link {link:?}: {e}"),
    }
}

fn main() {
    println!("cargo:rerun-if-changed=style/tailwind.css");

    let pkg_dir = Path::new(SITE_PKG_DIR);
    if let Err(e) = fs::create_dir_all(pkg_dir) {
        println!("cargo:warning=Failed to create {pkg_dir:?}: {e}");
        return;
    }

    copy_if_present(
        Path::new("target/tmp/tailwind.css"),
        &pkg_dir.join(format!("{OUTPUT_NAME}.css")),
    );
    copy_if_present(
        Path::new("public/favicon.ico"),
        Path::new("target/site/favicon.ico"),
    );
    link_wasm(pkg_dir);
}
