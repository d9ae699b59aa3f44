use std::fs;
use std::path::PathBuf;
use std::process::{Command, Output};

fn glextgen(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_glextgen"))
        .args(args)
        .env_remove("GLEXTGEN_LOG")
        .output()
        .expect("could not run glextgen")
}

fn temp_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("glextgen-cli-{name}-{}", std::process::id()));
    let _ = fs::remove_dir_all(&dir);
    fs::create_dir_all(&dir).unwrap();
    dir
}

#[test]
fn wrong_arg_count_prints_usage_and_fails() {
    let dir = temp_dir("usage");
    let out = dir.join("out");
    let input = dir.join("exts.txt");
    fs::write(&input, "glFoo\n").unwrap();
    let input = input.to_str().unwrap();
    let out_str = out.to_str().unwrap();

    for args in [&[][..], &[input][..], &[input, out_str, "extra"][..]] {
        let output = glextgen(args);
        assert!(!output.status.success(), "args: {args:?}");
        let stdout = String::from_utf8_lossy(&output.stdout);
        assert!(stdout.starts_with("usage : "), "stdout: {stdout}");
        assert!(stdout.contains("extensions_file generate_path"));
        assert!(!out.exists());
    }

    fs::remove_dir_all(&dir).unwrap();
}

#[test]
fn generates_into_dir() {
    let dir = temp_dir("generate");
    let input = dir.join("exts.txt");
    fs::write(&input, "GL_EXT_foo\nGL_EXT_foo\n\nGL_ARB_bar\n").unwrap();
    let out = dir.join("gen");

    for _ in 0..2 {
        let output = glextgen(&[input.to_str().unwrap(), out.to_str().unwrap()]);
        assert!(output.status.success());
        // nothing to say on a clean run.
        assert!(output.stdout.is_empty());
        assert!(output.stderr.is_empty(), "{}", String::from_utf8_lossy(&output.stderr));
    }

    let header = fs::read_to_string(out.join("_extensions.h")).unwrap();
    let inline = fs::read_to_string(out.join("_extensions.inl")).unwrap();
    let bar = header.find("#define GL_ARB_bar pfn_ARB_bar").unwrap();
    let foo = header.find("#define GL_EXT_foo pfn_EXT_foo").unwrap();
    assert!(bar < foo);
    assert_eq!(inline.matches("getAddress(").count(), 2);

    fs::remove_dir_all(&dir).unwrap();
}

#[test]
fn missing_input_fails() {
    let dir = temp_dir("missing");
    let output = glextgen(&[
        dir.join("nope.txt").to_str().unwrap(),
        dir.join("gen").to_str().unwrap(),
    ]);
    assert!(!output.status.success());
    assert!(!dir.join("gen").exists());

    fs::remove_dir_all(&dir).unwrap();
}
