//! Code fence tracking so directive syntax inside fenced code is left alone.

/// Tracks fenced code block state during line-by-line scanning.
///
/// Fences use three or more backticks or tildes; the closing fence uses the
/// same character and is at least as long as the opening one.
#[derive(Debug, Default)]
pub(crate) struct FenceTracker {
    open: Option<(char, usize)>,
}

impl FenceTracker {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn in_fence(&self) -> bool {
        self.open.is_some()
    }

    /// Feed a line. Returns `true` if it opened or closed a fence.
    pub(crate) fn update(&mut self, line: &str) -> bool {
        let trimmed = line.trim_start();
        let Some((ch, len)) = fence_run(trimmed) else {
            return false;
        };

        match self.open {
            Some((open_ch, open_len)) => {
                let closes = ch == open_ch
                    && len >= open_len
                    && trimmed[len..].chars().all(char::is_whitespace);
                if closes {
                    self.open = None;
                }
                closes
            }
            None => {
                self.open = Some((ch, len));
                true
            }
        }
    }
}

/// Leading run of three or more backticks or tildes.
fn fence_run(trimmed: &str) -> Option<(char, usize)> {
    let first = trimmed.chars().next().filter(|&c| c == '`' || c == '~')?;
    // Fence characters are ASCII, so the char count is also the byte length
    let count = trimmed.chars().take_while(|&c| c == first).count();
    (count >= 3).then_some((first, count))
}
