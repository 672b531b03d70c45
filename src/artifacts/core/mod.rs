//! Core utilities and shared types
//!
//! Output paging for commands that can print long histories.

use derive_new::new;
use is_terminal::IsTerminal;
use minus::Pager;
use std::io::{self, Write};

/// Environment variable that turns paging off when set
pub const NO_PAGER_ENV: &str = "NO_PAGER";

/// Page output only for an interactive stdout, unless the user opted out
pub fn should_page() -> bool {
    io::stdout().is_terminal() && std::env::var_os(NO_PAGER_ENV).is_none()
}

/// Adapts the minus pager to `std::io::Write` so it can stand in for stdout
///
/// ```ignore
/// let pager = Pager::new();
/// let mut writer = PagerWriter::new(pager.clone());
/// writeln!(writer, "commit ...")?;
/// minus::page_all(pager)?;
/// ```
#[derive(new)]
pub struct PagerWriter {
    pager: Pager,
}

impl Write for PagerWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let text =
            std::str::from_utf8(buf).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
        self.pager.push_str(text).map_err(io::Error::other)?;

        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
