use std::collections::BTreeSet;
use std::fs;
use std::path::Path;

use anyhow::Context as _;

// GL_, WGL etc. everything that comes before the base name is expected to be
// two chars wide.
const PREFIX_LEN: usize = 2;

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct Extension {
    name: String,
}

impl Extension {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// `PFN<UPPER(name)>PROC`, the pointer type glext.h declares for the
    /// function.
    pub fn typename(&self) -> String {
        format!("PFN{}PROC", self.name.to_uppercase())
    }

    /// `pfn` followed by the name with its vendor prefix stripped.
    pub fn funcname(&self) -> String {
        let base = match self.name.char_indices().nth(PREFIX_LEN) {
            Some((offset, _)) => &self.name[offset..],
            None => "",
        };
        format!("pfn{base}")
    }

    pub fn declaration(&self) -> String {
        format!("{} {};", self.typename(), self.funcname())
    }

    pub fn extern_declaration(&self) -> String {
        format!("extern {}", self.declaration())
    }

    pub fn macro_define(&self) -> String {
        format!("#define {} {}", self.name, self.funcname())
    }

    /// Statement for the body of the loader routine. `getAddress` is not
    /// generated, the consuming code must provide it.
    pub fn loader_statement(&self) -> String {
        format!(
            "  {} = ({})\n      getAddress(\"{}\");\n",
            self.funcname(),
            self.typename(),
            self.name,
        )
    }
}

/// Unique extensions in byte-wise ascending order.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ExtensionSet {
    extensions: BTreeSet<Extension>,
}

impl ExtensionSet {
    pub fn parse(text: &str) -> Self {
        let extensions = text
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .inspect(|line| {
                if line.chars().count() <= PREFIX_LEN {
                    log::warn!("extension {line:?} has nothing after its prefix");
                }
            })
            .map(Extension::new)
            .collect();
        Self { extensions }
    }

    pub fn read<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path)
            .with_context(|| format!("could not read {}", path.display()))?;
        let set = Self::parse(&text);
        log::debug!("read {} extensions from {}", set.len(), path.display());
        Ok(set)
    }

    pub fn len(&self) -> usize {
        self.extensions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.extensions.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Extension> {
        self.extensions.iter()
    }
}

#[cfg(test)]
fn names(set: &ExtensionSet) -> Vec<&str> {
    set.iter().map(Extension::name).collect()
}

#[test]
fn test_parse_dedups_and_sorts() {
    let set = ExtensionSet::parse("GL_EXT_foo\nGL_EXT_foo\n\nGL_ARB_bar");
    assert_eq!(names(&set), ["GL_ARB_bar", "GL_EXT_foo"]);
}

#[test]
fn test_parse_ignores_blank_lines_and_line_endings() {
    let set = ExtensionSet::parse("\n\r\n  glFoo  \r\nglBar\r\n\n\n");
    assert_eq!(names(&set), ["glBar", "glFoo"]);
}

#[test]
fn test_parse_is_byte_ordered() {
    // uppercase sorts before lowercase, no locale games.
    let set = ExtensionSet::parse("glb\nglB\ngla\nglA");
    assert_eq!(names(&set), ["glA", "glB", "gla", "glb"]);
}

#[test]
fn test_parse_order_independent() {
    let a = ExtensionSet::parse("glGenBuffersARB\nglBindBufferARB\nglGenBuffersARB\n");
    let b = ExtensionSet::parse("\n\nglBindBufferARB\n\nglGenBuffersARB");
    assert_eq!(a, b);
}

#[test]
fn test_parse_empty() {
    assert!(ExtensionSet::parse("").is_empty());
    assert!(ExtensionSet::parse("\n \n\t\n").is_empty());
}

#[test]
fn test_derivations() {
    let ext = Extension::new("GL_ARB_bar");
    assert_eq!(ext.typename(), "PFNGL_ARB_BARPROC");
    assert_eq!(ext.funcname(), "pfn_ARB_bar");
    assert_eq!(ext.declaration(), "PFNGL_ARB_BARPROC pfn_ARB_bar;");
    assert_eq!(
        ext.extern_declaration(),
        "extern PFNGL_ARB_BARPROC pfn_ARB_bar;"
    );
    assert_eq!(ext.macro_define(), "#define GL_ARB_bar pfn_ARB_bar");
    assert_eq!(
        ext.loader_statement(),
        "  pfn_ARB_bar = (PFNGL_ARB_BARPROC)\n      getAddress(\"GL_ARB_bar\");\n"
    );
}

#[test]
fn test_funcname_short_names() {
    assert_eq!(Extension::new("gl").funcname(), "pfn");
    assert_eq!(Extension::new("g").funcname(), "pfn");
    assert_eq!(Extension::new("glX").funcname(), "pfnX");
}

#[test]
fn test_funcname_strips_chars_not_bytes() {
    // each 'é' is two bytes wide, a byte offset of 2 would eat only one of them.
    assert_eq!(Extension::new("éé_foo").funcname(), "pfn_foo");
    assert_eq!(Extension::new("éé").funcname(), "pfn");
    assert_eq!(Extension::new("é").funcname(), "pfn");
    assert_eq!(Extension::new("gé_foo").funcname(), "pfn_foo");
}
