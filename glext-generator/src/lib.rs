mod extension;
mod generate;

pub use extension::{Extension, ExtensionSet};
pub use generate::{
    Generated, HEADER_FILE_NAME, INLINE_FILE_NAME, banner, generate, render_header,
    render_inline, timestamp,
};
