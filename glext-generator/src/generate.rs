#![allow(clippy::write_with_newline)]

use std::fs::{self, File};
use std::io::{self, BufWriter, Write as _};
use std::path::{Path, PathBuf};

use anyhow::Context as _;

use crate::extension::{Extension, ExtensionSet};

pub const HEADER_FILE_NAME: &str = "_extensions.h";
pub const INLINE_FILE_NAME: &str = "_extensions.inl";

const TIMESTAMP_FORMAT: &str = "%Y/%m/%d %H:%M:%S";

pub fn timestamp() -> String {
    chrono::Local::now().format(TIMESTAMP_FORMAT).to_string()
}

pub fn banner(timestamp: &str) -> String {
    format!("// This file was generated by a script @ {timestamp}\n\n")
}

fn join_lines(set: &ExtensionSet, f: impl Fn(&Extension) -> String) -> String {
    set.iter().map(f).collect::<Vec<_>>().join("\n")
}

pub fn render_header<W: io::Write>(
    w: &mut W,
    set: &ExtensionSet,
    timestamp: &str,
) -> io::Result<()> {
    write!(w, "{}", banner(timestamp))?;
    write!(w, "#ifndef EXT_EXTENSIONS_H\n")?;
    write!(w, "#define EXT_EXTENSIONS_H\n")?;
    write!(w, "\n")?;
    write!(w, "#include \"GL/gl.h\"\n")?;
    write!(w, "#include \"GL/glext.h\"\n")?;
    write!(w, "\n")?;
    write!(w, "{}", join_lines(set, Extension::extern_declaration))?;
    write!(w, "\n\n")?;
    write!(w, "{}", join_lines(set, Extension::macro_define))?;
    write!(w, "\n\n")?;
    write!(w, "#endif  // EXT_EXTENSIONS_H\n")
}

pub fn render_inline<W: io::Write>(
    w: &mut W,
    set: &ExtensionSet,
    timestamp: &str,
) -> io::Result<()> {
    write!(w, "{}", banner(timestamp))?;
    write!(w, "{}", join_lines(set, Extension::declaration))?;
    write!(w, "\n")?;
    write!(w, "\n")?;
    write!(w, "static\n")?;
    write!(w, "void LoadExtensionFuncPtrs() {{\n")?;
    write!(w, "{}", join_lines(set, Extension::loader_statement))?;
    write!(w, "\n")?;
    write!(w, "}}\n")?;
    write!(w, "\n")
}

#[derive(Debug)]
pub struct Generated {
    pub header: PathBuf,
    pub inline: PathBuf,
}

fn write_file(
    path: &Path,
    set: &ExtensionSet,
    timestamp: &str,
    render: fn(&mut BufWriter<File>, &ExtensionSet, &str) -> io::Result<()>,
) -> anyhow::Result<()> {
    let file =
        File::create(path).with_context(|| format!("could not create {}", path.display()))?;
    let mut w = BufWriter::new(file);
    render(&mut w, set, timestamp)
        .and_then(|_| w.flush())
        .with_context(|| format!("could not write {}", path.display()))?;
    log::debug!("wrote {}", path.display());
    Ok(())
}

/// Writes both artifacts into `out_dir`, creating it if needed. Existing files
/// are overwritten.
pub fn generate<P: AsRef<Path>>(set: &ExtensionSet, out_dir: P) -> anyhow::Result<Generated> {
    let out_dir = out_dir.as_ref();

    // NOTE: an already existing dir is fine, anything else is not.
    fs::create_dir_all(out_dir)
        .with_context(|| format!("could not create dir {}", out_dir.display()))?;

    let timestamp = timestamp();
    let generated = Generated {
        header: out_dir.join(HEADER_FILE_NAME),
        inline: out_dir.join(INLINE_FILE_NAME),
    };
    write_file(&generated.header, set, &timestamp, render_header)?;
    write_file(&generated.inline, set, &timestamp, render_inline)?;

    Ok(generated)
}
