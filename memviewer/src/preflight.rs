//! Pre-flight checks for memviewer
//!
//! Validates the input before the parser sees it. Only linker map reports
//! are understood; anything else is rejected with a message that says what
//! to pass instead.

use log::debug;
use object::FileKind;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use crate::domain::InputError;

/// Bytes read when sniffing a non-map input. Enough for any object header
/// magic `object` recognizes.
const SNIFF_LEN: usize = 64;

/// Accept `path` if it names a linker map report.
///
/// # Errors
/// Returns [`InputError::ObjectFileNotSupported`] for ELF objects and
/// [`InputError::UnsupportedExtension`] for anything else that is not a
/// `.map` file.
pub fn check_input(path: &Path) -> Result<(), InputError> {
    if path.extension().is_some_and(|ext| ext == "map") {
        return Ok(());
    }

    if is_elf_object(path) {
        return Err(InputError::ObjectFileNotSupported { path: path.to_path_buf() });
    }
    Err(InputError::UnsupportedExtension { path: path.to_path_buf() })
}

/// Whether the file starts with an ELF header. Unreadable files are not.
fn is_elf_object(path: &Path) -> bool {
    let mut header = Vec::with_capacity(SNIFF_LEN);
    let read = File::open(path)
        .and_then(|file| file.take(SNIFF_LEN as u64).read_to_end(&mut header));
    if let Err(e) = read {
        debug!("Cannot sniff {}: {e}", path.display());
        return false;
    }

    match FileKind::parse(header.as_slice()) {
        Ok(FileKind::Elf32 | FileKind::Elf64) => true,
        Ok(kind) => {
            debug!("{} looks like {kind:?}", path.display());
            false
        }
        Err(_) => false,
    }
}
