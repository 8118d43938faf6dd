//! The console read loop.
//!
//! All prompting and input parsing lives here; the engine only answers
//! questions about the graph.

use corkboard::Element;
use dialogue::{Advance, Cursor, Dialogue, DialogueError, Turn};
use std::io::{BufRead, Write};
use tracing::{debug, warn};

/// Why a walk stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WalkEnd {
    /// The dialogue reached a terminal state.
    Finished,
    /// Too many automatic transitions in a row.
    StepLimit,
    /// Input ran out while waiting for a choice.
    InputClosed,
}

/// Plays dialogues read from `input`, writing narration to `output` and
/// diagnostics to `errors`.
pub struct Player<'g, R, W, E> {
    dialogue: Dialogue<'g>,
    input: R,
    output: W,
    errors: E,
    max_auto_steps: usize,
}

impl<'g, R: BufRead, W: Write, E: Write> Player<'g, R, W, E> {
    pub fn new(dialogue: Dialogue<'g>, input: R, output: W, errors: E) -> Self {
        Self {
            dialogue,
            input,
            output,
            errors,
            max_auto_steps: 1000,
        }
    }

    pub fn with_max_auto_steps(mut self, max_auto_steps: usize) -> Self {
        self.max_auto_steps = max_auto_steps;
        self
    }

    /// Play from `start`, then keep offering restarts by label until the
    /// player types `q` or input ends.
    pub fn session(&mut self, start: Cursor) -> anyhow::Result<()> {
        writeln!(
            self.output,
            "Beginning dialogue.\n\nThe selected project is \"{}\".\n",
            self.dialogue.graph().name
        )?;

        let mut cursor = start;
        'walks: loop {
            if self.play(cursor)? == WalkEnd::InputClosed {
                break;
            }

            loop {
                writeln!(
                    self.output,
                    "To start again, input the label of the node you'd like to resume from.\n\
                     Otherwise, type q to end the program.\n"
                )?;

                let Some(line) = self.read_line()? else {
                    break 'walks;
                };
                if line == "q" {
                    break 'walks;
                }

                match self.dialogue.start_at_label(&line) {
                    Some(restart) => {
                        writeln!(self.output)?;
                        cursor = restart;
                        continue 'walks;
                    }
                    None => writeln!(self.errors, "No node is labeled \"{}\".", line)?,
                }
            }
        }

        writeln!(self.output, "\nTerminating program.")?;
        Ok(())
    }

    /// Walk from `cursor` until the dialogue ends.
    pub fn play(&mut self, mut cursor: Cursor) -> anyhow::Result<WalkEnd> {
        let graph = self.dialogue.graph();
        match cursor.node().and_then(|node| graph.node(node)) {
            Some(node) => writeln!(self.output, "Starting node: {}", node.label())?,
            None => writeln!(self.output, "There is no node to start from.")?,
        }

        let mut auto_steps = 0;

        while let Some(turn) = self.dialogue.turn(cursor)? {
            if let Some(narration) = &turn.narration {
                writeln!(self.output, "\"{}\"", narration)?;
            }

            let advance = if turn.needs_choice() {
                auto_steps = 0;
                match self.choose(&turn)? {
                    Some(advance) => advance,
                    None => return Ok(WalkEnd::InputClosed),
                }
            } else {
                auto_steps += 1;
                if auto_steps > self.max_auto_steps {
                    warn!(limit = self.max_auto_steps, "automatic step limit reached");
                    writeln!(
                        self.errors,
                        "Warning: stopped after {} automatic steps without a choice.",
                        self.max_auto_steps
                    )?;
                    writeln!(self.output, "\nEnd of dialogue.\n")?;
                    return Ok(WalkEnd::StepLimit);
                }
                self.dialogue.advance(turn.node, None)?
            };

            for warning in &advance.warnings {
                writeln!(self.errors, "Warning: {}", warning)?;
            }

            debug!(from = %turn.node, to = %advance.next, "step");
            cursor = advance.next;
        }

        writeln!(self.output, "\nEnd of dialogue.\n")?;
        Ok(WalkEnd::Finished)
    }

    /// Prompt until the player picks a valid choice; `None` when input ends.
    fn choose(&mut self, turn: &Turn) -> anyhow::Result<Option<Advance>> {
        writeln!(self.output)?;
        for choice in &turn.choices {
            writeln!(self.output, "{}: {}", choice.index, choice.label)?;
        }

        loop {
            writeln!(
                self.output,
                "\nType the corresponding number of the response you want to reply with:"
            )?;

            let Some(line) = self.read_line()? else {
                return Ok(None);
            };

            let Ok(index) = line.parse::<usize>() else {
                writeln!(self.errors, "Invalid number.")?;
                continue;
            };

            match self.dialogue.advance(turn.node, Some(index)) {
                Ok(advance) => {
                    if let Some(choice) = turn.choices.get(index) {
                        writeln!(self.output, "\n>{}.", choice.label)?;
                    }
                    return Ok(Some(advance));
                }
                Err(DialogueError::InvalidChoice { .. }) => {
                    writeln!(self.errors, "Please input an available response number.\n")?;
                }
                Err(error) => return Err(error.into()),
            }
        }
    }

    fn read_line(&mut self) -> anyhow::Result<Option<String>> {
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }
}
