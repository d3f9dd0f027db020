use std::io::Write;

/// Receives a tick for every record accepted during a run
pub trait Progress {
    fn advance(&mut self);
}

/// A no-op progress sink
#[derive(Debug, Default, Clone, Copy)]
pub struct NullProgress;

impl Progress for NullProgress {
    fn advance(&mut self) {}
}

/// Prints one dot per record, breaking the line every `width` dots
pub struct DotProgress<W: Write> {
    out: W,
    width: usize,
    column: usize,
}

impl DotProgress<std::io::Stdout> {
    /// Dots on stdout, 30 per line
    pub fn stdout() -> Self {
        Self::new(std::io::stdout(), 30)
    }
}

impl<W: Write> DotProgress<W> {
    pub fn new(out: W, width: usize) -> Self {
        Self {
            out,
            width: width.max(1),
            column: 0,
        }
    }

    /// Terminate a partially filled line
    pub fn finish(&mut self) {
        if self.column > 0 {
            let _ = writeln!(self.out);
            let _ = self.out.flush();
            self.column = 0;
        }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> Progress for DotProgress<W> {
    fn advance(&mut self) {
        self.column += 1;
        // Progress output is best effort; a closed stdout must not end the search
        let _ = if self.column == self.width {
            self.column = 0;
            writeln!(self.out, ".")
        } else {
            write!(self.out, ".")
        };
        let _ = self.out.flush();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dot_progress_wraps_lines() {
        let mut progress = DotProgress::new(Vec::new(), 3);
        for _ in 0..7 {
            progress.advance();
        }
        progress.finish();

        let out = String::from_utf8(progress.into_inner()).unwrap();
        assert_eq!(out, "...\n...\n.\n");
    }

    #[test]
    fn test_finish_on_full_line_adds_nothing() {
        let mut progress = DotProgress::new(Vec::new(), 2);
        progress.advance();
        progress.advance();
        progress.finish();

        assert_eq!(progress.into_inner(), b"..\n");
    }

    #[test]
    fn test_null_progress_is_silent() {
        let mut progress = NullProgress;
        progress.advance();
    }
}
