/// Separator bytes that end a command-word run and start a fresh separator
/// tail: `|`, `;`, `&`. Newline is part of spec.md's separator set too, but
/// `is_whitespace` (checked first at every call site) already matches it,
/// so it can never reach this function — omitted rather than left dead.
fn is_separator(b: u8) -> bool {
    matches!(b, b'|' | b';' | b'&')
}

fn is_whitespace(b: u8) -> bool {
    matches!(b, b' ' | b'\t' | b'\r' | b'\n' | 0x0b)
}

/// Name -> replacement mapping, insertion-ordered. Grounded on the source's
/// `alias_head` linked list (`add_alias`/`del_alias`/`resolve_alias`), kept
/// here as a small `Vec` since lookups are by linear scan either way and the
/// table is expected to hold a handful of entries for an interactive shell.
#[derive(Debug, Default)]
pub struct AliasTable {
    entries: Vec<(String, String)>,
}

impl AliasTable {
    pub fn new() -> Self {
        AliasTable::default()
    }

    /// Insert or replace `name`'s replacement in place, preserving its
    /// original position if it already existed.
    pub fn add(&mut self, name: &str, replacement: &str) {
        if let Some(entry) = self.entries.iter_mut().find(|(n, _)| n == name) {
            entry.1 = replacement.to_string();
        } else {
            self.entries.push((name.to_string(), replacement.to_string()));
        }
    }

    /// Remove `name`. A no-op if it is not present.
    pub fn remove(&mut self, name: &str) {
        self.entries.retain(|(n, _)| n != name);
    }

    fn lookup(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    /// Substitute alias names that syntactically begin a command, per
    /// spec.md §4.3: the line is partitioned into alternating runs of
    /// whitespace, command words, and separator tails (up to and including
    /// the next byte in `{| ; & \n}`); only the first word following the
    /// start of the line or a separator tail is a candidate.
    pub fn expand(&self, line: &str) -> String {
        let bytes = line.as_bytes();
        let mut out = String::with_capacity(line.len());
        let mut pos = 0;
        let mut at_command_start = true;

        while pos < bytes.len() {
            let start = pos;
            while pos < bytes.len() && is_whitespace(bytes[pos]) {
                pos += 1;
            }
            out.push_str(&line[start..pos]);
            if pos >= bytes.len() {
                break;
            }

            if is_separator(bytes[pos]) {
                let start = pos;
                while pos < bytes.len() && !is_whitespace(bytes[pos]) && is_separator(bytes[pos]) {
                    pos += 1;
                }
                out.push_str(&line[start..pos]);
                at_command_start = true;
                continue;
            }

            let start = pos;
            while pos < bytes.len() && !is_whitespace(bytes[pos]) && !is_separator(bytes[pos]) {
                pos += 1;
            }
            let word = &line[start..pos];
            if at_command_start {
                out.push_str(self.lookup(word).unwrap_or(word));
            } else {
                out.push_str(word);
            }
            at_command_start = false;
        }

        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_then_expand_substitutes_command_word() {
        let mut table = AliasTable::new();
        table.add("ll", "ls -l");
        assert_eq!(table.expand("ll /"), "ls -l /");
    }

    #[test]
    fn add_replaces_in_place_not_shadow() {
        let mut table = AliasTable::new();
        table.add("ll", "ls -l");
        table.add("ll", "ls -la");
        assert_eq!(table.expand("ll"), "ls -la");
    }

    #[test]
    fn remove_drops_alias() {
        let mut table = AliasTable::new();
        table.add("ll", "ls -l");
        table.remove("ll");
        assert_eq!(table.expand("ll /"), "ll /");
    }

    #[test]
    fn only_command_start_words_are_candidates() {
        let mut table = AliasTable::new();
        table.add("echo", "printf");
        assert_eq!(table.expand("ls echo"), "ls echo");
    }

    #[test]
    fn each_segment_after_a_separator_is_a_fresh_command_start() {
        let mut table = AliasTable::new();
        table.add("ll", "ls -l");
        assert_eq!(table.expand("ll; ll | ll & ll"), "ls -l; ls -l | ls -l & ls -l");
    }

    #[test]
    fn unknown_word_is_left_unchanged() {
        let table = AliasTable::new();
        assert_eq!(table.expand("git status"), "git status");
    }

    #[test]
    fn expansion_is_not_recursive() {
        let mut table = AliasTable::new();
        table.add("a", "b");
        table.add("b", "c");
        assert_eq!(table.expand("a"), "b");
    }
}
