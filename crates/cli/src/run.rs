use std::cell::Cell;
use std::io::{self, BufRead, Write};
use std::rc::Rc;

use textlens::atom::Observable;
use textlens::state::TextState;

use crate::log::{self, Label};
use crate::report::{ErrorExt, Report};
use crate::Run;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Format {
    /// The three views, one per line, in the same order as the web demo.
    Text,
    /// One JSON snapshot per line.
    Json,
}

pub fn run(r: &Run) -> Report<()> {
    let state = TextState::with_text(r.text.as_str());
    let format = if r.json { Format::Json } else { Format::Text };

    let frames = session(&state, io::stdin().lock(), io::stdout().lock(), format)?;

    log::info!("rendered {frames} frames");

    Ok(())
}

/// Render the initial state, then apply every line of `input` as an edit,
/// rendering again whenever the state notifies about a change.
///
/// Returns the number of rendered frames.
pub fn session<R, W>(state: &TextState, input: R, mut out: W, format: Format) -> Report<usize>
where
    R: BufRead,
    W: Write,
{
    let changed = Rc::new(Cell::new(false));
    let id = {
        let changed = changed.clone();

        state.subscribe(move || changed.set(true))
    };

    render(state, &mut out, format)?;
    let mut frames = 1;

    for line in input.lines() {
        let line = line.message("failed to read from stdin")?;

        state.set_text(line);

        if changed.replace(false) {
            render(state, &mut out, format)?;
            frames += 1;
        } else {
            log::info!("text unchanged, skipping render");
        }
    }

    state.unsubscribe(id);
    out.flush().message("failed to write to stdout")?;

    Ok(frames)
}

fn render<W>(state: &TextState, out: &mut W, format: Format) -> Report<()>
where
    W: Write,
{
    match format {
        Format::Text => writeln!(
            out,
            "{} {}\n{} {}\n{} {}\n",
            Label("length"),
            state.length(),
            Label("input"),
            state.text(),
            Label("uppercase"),
            state.uppercase(),
        )
        .message("failed to write to stdout"),
        Format::Json => {
            serde_json::to_writer(&mut *out, &state.snapshot())
                .message("failed to encode snapshot")?;

            writeln!(out).message("failed to write to stdout")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run_session(input: &str, format: Format) -> (usize, String) {
        let state = TextState::new();
        let mut out = Vec::new();

        let frames = session(&state, input.as_bytes(), &mut out, format).unwrap();

        (frames, String::from_utf8(out).unwrap())
    }

    #[test]
    fn renders_initial_state() {
        let (frames, out) = run_session("", Format::Text);

        assert_eq!(frames, 1);
        assert_eq!(out, "   length 5\n    input hello\nuppercase HELLO\n\n");
    }

    #[test]
    fn renders_each_change() {
        let (frames, out) = run_session("Test 123\n\n", Format::Text);

        assert_eq!(frames, 3);
        assert_eq!(
            out,
            "   length 5\n    input hello\nuppercase HELLO\n\n\
             \x20  length 8\n    input Test 123\nuppercase TEST 123\n\n\
             \x20  length 0\n    input \nuppercase \n\n"
        );
    }

    #[test]
    fn skips_unchanged_lines() {
        let (frames, _) = run_session("hello\nhello\nworld\r\nworld\n", Format::Text);

        assert_eq!(frames, 2);
    }

    #[test]
    fn json_snapshots() {
        let (frames, out) = run_session("Straße\n", Format::Json);

        assert_eq!(frames, 2);
        assert_eq!(
            out,
            "{\"text\":\"hello\",\"uppercase\":\"HELLO\",\"length\":5}\n\
             {\"text\":\"Straße\",\"uppercase\":\"STRASSE\",\"length\":6}\n"
        );
    }

    #[test]
    fn state_is_left_with_last_edit() {
        let state = TextState::new();

        session(&state, "one\ntwo\n".as_bytes(), io::sink(), Format::Text).unwrap();

        assert_eq!(*state.text(), "two");
        assert_eq!(state.length(), 3);
    }
}
