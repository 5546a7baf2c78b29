use std::io::{self, Write};

/// Indentation state for a tagged-text document.
///
/// Every opening tag increases the depth by one, every closing tag decreases it.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Tabs {
    depth: usize,
}

impl Tabs {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn depth(&self) -> usize {
        self.depth
    }

    pub fn increase(&mut self) {
        self.depth += 1;
    }

    /// Decrease the depth, never going below zero.
    ///
    /// Debug builds assert on a closing tag without a matching opening tag.
    pub fn decrease(&mut self) {
        debug_assert!(self.depth > 0, "closing tag without matching opening tag");
        self.depth = self.depth.saturating_sub(1);
    }

    /// Write one tab character per depth level.
    pub fn write_tabs<W: Write + ?Sized>(&self, out: &mut W) -> io::Result<()> {
        for _ in 0..self.depth {
            out.write_all(b"\t")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn given_depth_one_when_decreasing_then_returns_to_zero() {
        let mut tabs = Tabs::new();
        tabs.increase();
        tabs.decrease();
        assert_eq!(tabs.depth(), 0);
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "closing tag without matching opening tag")]
    fn given_zero_depth_when_decreasing_then_debug_asserts() {
        let mut tabs = Tabs::new();
        tabs.decrease();
    }

    #[test]
    fn given_depth_two_when_writing_tabs_then_writes_two_tabs() {
        let mut tabs = Tabs::new();
        tabs.increase();
        tabs.increase();
        let mut out = Vec::new();
        tabs.write_tabs(&mut out).unwrap();
        assert_eq!(out, b"\t\t");
    }
}
