//! Terminal bell tone.

use std::io::{self, Write};

use tracing::warn;

use crate::core::TonePlayer;

/// ASCII BEL.
const BEL: &[u8] = b"\x07";

/// Rings the terminal bell as the phase chime.
#[derive(Debug, Default, Clone, Copy)]
pub struct TerminalBell;

impl TerminalBell {
    /// Create a bell.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    fn ring<W: Write>(out: &mut W) -> io::Result<()> {
        out.write_all(BEL)?;
        out.flush()
    }
}

impl TonePlayer for TerminalBell {
    fn play(&mut self) {
        if let Err(e) = Self::ring(&mut io::stdout()) {
            warn!(error = %e, "failed to ring terminal bell");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ring_writes_bel() {
        let mut buf = Vec::new();
        TerminalBell::ring(&mut buf).unwrap();
        assert_eq!(buf, b"\x07");
    }
}
