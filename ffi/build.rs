use std::env;
use std::path::PathBuf;

fn main() {
    println!("cargo:rerun-if-changed=src");

    let crate_dir = match env::var("CARGO_MANIFEST_DIR") {
        Ok(dir) => PathBuf::from(dir),
        Err(_) => return,
    };

    match cbindgen::Builder::new()
        .with_crate(&crate_dir)
        .with_language(cbindgen::Language::C)
        .with_include_guard("CRITICIDE_H")
        .with_no_includes()
        .with_sys_include("stdbool.h")
        .with_sys_include("stdint.h")
        .generate()
    {
        Ok(bindings) => {
            bindings.write_to_file(crate_dir.join("include").join("criticide.h"));
        }
        Err(err) => println!("cargo:warning=failed to generate C header: {err}"),
    }
}
