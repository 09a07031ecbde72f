#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Shared rendering contracts for Hydrogen Bombs adapters.
//!
//! Frames are composed here as plain text so every backend draws exactly the
//! same picture. Backends only implement [`Renderer::clear`] and
//! [`Renderer::present`]; the remaining methods compose a [`Frame`] and hand
//! it over.

use std::fmt;

use anyhow::Result as AnyResult;
use hydrogen_bombs_core::{
    Difficulty, ExplosionFrame, GridSize, HazardSnapshot, PlayerPosition, Score, SCORE_PER_LEVEL,
};

const BORDER: char = '#';
const HAZARD_GLYPH: char = '&';
const PLAYER_GLYPH: &str = "/\\";
const EMPTY: char = ' ';
const BLAST_GLYPH: char = '*';
const EMBER_GLYPH: char = '.';
const BOOM_BANNER: &str = "*** BOOM! ***";

/// Snapshot of everything drawn on a playfield frame.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Scene {
    /// Dimensions of the playfield.
    pub grid: GridSize,
    /// Player position.
    pub player: PlayerPosition,
    /// Active hazards.
    pub hazards: Vec<HazardSnapshot>,
    /// Current score.
    pub score: Score,
    /// Difficulty derived from the score.
    pub difficulty: Difficulty,
}

/// Final result reported once the game ends.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GameSummary {
    /// Score reached.
    pub score: Score,
    /// Difficulty reached.
    pub difficulty: Difficulty,
}

/// Block of text lines ready to be drawn from the top-left corner.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Frame {
    lines: Vec<String>,
}

impl Frame {
    /// Lines of the frame, top to bottom.
    #[must_use]
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    fn push(&mut self, line: impl Into<String>) {
        self.lines.push(line.into());
    }
}

impl fmt::Display for Frame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for line in &self.lines {
            writeln!(f, "{line}")?;
        }
        Ok(())
    }
}

/// Output device able to show composed frames.
pub trait Renderer {
    /// Wipes the screen.
    fn clear(&mut self) -> AnyResult<()>;

    /// Draws `frame` from the top-left corner.
    fn present(&mut self, frame: &Frame) -> AnyResult<()>;

    /// Clears the screen and draws the playfield for `scene`.
    fn render(&mut self, scene: &Scene) -> AnyResult<()> {
        self.clear()?;
        self.present(&compose_playfield(scene))
    }

    /// Clears the screen and draws one explosion frame around `player`.
    fn render_explosion(
        &mut self,
        grid: GridSize,
        player: PlayerPosition,
        frame: ExplosionFrame,
    ) -> AnyResult<()> {
        self.clear()?;
        self.present(&compose_explosion(grid, player, frame))
    }

    /// Clears the screen and draws the game-over box.
    fn render_game_over(&mut self, summary: &GameSummary) -> AnyResult<()> {
        self.clear()?;
        self.present(&compose_game_over(summary))
    }

    /// Clears the screen and draws the start-up instructions.
    fn render_instructions(&mut self, banner: &str) -> AnyResult<()> {
        self.clear()?;
        self.present(&compose_instructions(banner))
    }
}

/// Composes the bordered playfield followed by the status line.
#[must_use]
pub fn compose_playfield(scene: &Scene) -> Frame {
    let grid = scene.grid;
    let mut frame = Frame::default();
    frame.push(horizontal_border(grid));

    for row in 0..grid.height() {
        let mut line = String::with_capacity(grid.width() as usize + 2);
        line.push(BORDER);
        let mut column = 0;
        while column < grid.width() {
            let hazard_here = scene
                .hazards
                .iter()
                .any(|hazard| hazard.row == row && hazard.column == column);
            if hazard_here {
                line.push(HAZARD_GLYPH);
            } else if row == scene.player.row() && column == scene.player.column() {
                // The glyph covers both footprint cells and hides a hazard on the right one.
                line.push_str(PLAYER_GLYPH);
                column += 1;
            } else {
                line.push(EMPTY);
            }
            column += 1;
        }
        line.push(BORDER);
        frame.push(line);
    }

    frame.push(horizontal_border(grid));
    frame.push(format!(
        "Score: {} | Bombs/Wave: {} | Controls: a=Left, d=Right, q=Quit",
        scene.score.get(),
        scene.difficulty.hazards_per_wave()
    ));
    frame
}

/// Composes one frame of the explosion animation.
///
/// Frame 0 marks the footprint, frame 1 a blast of radius two and frame 2 the
/// embers within radius three, measured from the player's left cell.
#[must_use]
pub fn compose_explosion(grid: GridSize, player: PlayerPosition, frame: ExplosionFrame) -> Frame {
    let mut out = Frame::default();
    out.push(horizontal_border(grid));

    for row in 0..grid.height() {
        let mut line = String::with_capacity(grid.width() as usize + 2);
        line.push(BORDER);
        for column in 0..grid.width() {
            let distance = row.abs_diff(player.row()) + column.abs_diff(player.column());
            let glyph = match frame.index() {
                0 if row == player.row() && player.covers_column(column) => BLAST_GLYPH,
                1 if distance <= 2 => BLAST_GLYPH,
                2 if distance <= 3 => EMBER_GLYPH,
                _ => EMPTY,
            };
            line.push(glyph);
        }
        line.push(BORDER);
        out.push(line);
    }

    out.push(horizontal_border(grid));
    out.push("");
    out.push(BOOM_BANNER);
    out
}

/// Composes the boxed game-over report.
#[must_use]
pub fn compose_game_over(summary: &GameSummary) -> Frame {
    let mut frame = Frame::default();
    frame.push("");
    frame.push("╔════════════════════════════╗");
    frame.push("║       GAME OVER!           ║");
    frame.push("╠════════════════════════════╣");
    frame.push("║                            ║");
    frame.push(format!("║   Your Score: {:<4}        ║", summary.score.get()));
    frame.push(format!(
        "║   Difficulty: {} bombs     ║",
        summary.difficulty.hazards_per_wave()
    ));
    frame.push("║                            ║");
    frame.push("╚════════════════════════════╝");
    frame.push("");
    frame
}

/// Composes the instructions shown before the first tick.
#[must_use]
pub fn compose_instructions(banner: &str) -> Frame {
    let mut frame = Frame::default();
    frame.push(banner);
    frame.push(format!("Dodge the Hydrogen Bombs ({HAZARD_GLYPH})!"));
    frame.push(format!("Difficulty increases every {SCORE_PER_LEVEL} points!"));
    frame.push("Use 'a' and 'd' (or the arrow keys) to move left and right");
    frame.push("Press 'q' to quit");
    frame.push("Press any key to start...");
    frame
}

fn horizontal_border(grid: GridSize) -> String {
    std::iter::repeat(BORDER)
        .take(grid.width() as usize + 2)
        .collect()
}

#[cfg(test)]
mod tests {
    use hydrogen_bombs_core::HazardId;

    use super::*;

    fn scene(hazards: Vec<HazardSnapshot>) -> Scene {
        let grid = GridSize::STANDARD;
        Scene {
            grid,
            player: PlayerPosition::spawn_point(grid),
            hazards,
            score: Score::new(25),
            difficulty: Difficulty::for_score(Score::new(25), grid),
        }
    }

    fn hazard(column: u32, row: u32) -> HazardSnapshot {
        HazardSnapshot {
            id: HazardId::new(0),
            column,
            row,
        }
    }

    #[test]
    fn playfield_is_bordered_and_reports_status() {
        let frame = compose_playfield(&scene(Vec::new()));
        let lines = frame.lines();

        assert_eq!(lines.len(), 20 + 3);
        assert_eq!(lines[0], "#".repeat(42));
        assert_eq!(lines[21], "#".repeat(42));
        for line in &lines[1..21] {
            assert_eq!(line.chars().count(), 42);
        }
        assert_eq!(
            lines[22],
            "Score: 25 | Bombs/Wave: 3 | Controls: a=Left, d=Right, q=Quit"
        );
    }

    #[test]
    fn player_and_hazards_are_drawn_in_place() {
        let frame = compose_playfield(&scene(vec![hazard(3, 0)]));
        let lines = frame.lines();

        assert_eq!(&lines[1][..5], "#   &");
        let player_line = &lines[1 + 18];
        assert_eq!(&player_line[21..23], PLAYER_GLYPH);
        assert_eq!(player_line.chars().count(), 42);
    }

    #[test]
    fn hazard_on_the_left_cell_hides_the_player() {
        let frame = compose_playfield(&scene(vec![hazard(20, 18)]));
        let player_line = &frame.lines()[1 + 18];

        assert_eq!(&player_line[21..23], "& ");
        assert_eq!(player_line.chars().count(), 42);
    }

    #[test]
    fn explosion_frames_grow_outward() {
        let grid = GridSize::STANDARD;
        let player = PlayerPosition::spawn_point(grid);
        // Only playfield rows count; the banner below carries its own stars.
        let count = |frame: u8, glyph: char| {
            let frame = ExplosionFrame::new(frame).expect("frame exists");
            compose_explosion(grid, player, frame).lines()[1..=grid.height() as usize]
                .iter()
                .map(|line| line.chars().filter(|c| *c == glyph).count())
                .sum::<usize>()
        };

        assert_eq!(count(0, BLAST_GLYPH), 2);
        // Both blasts are clipped by the bottom edge one row below the player.
        assert_eq!(count(1, BLAST_GLYPH), 12);
        assert_eq!(count(2, EMBER_GLYPH), 21);
    }

    #[test]
    fn explosion_ends_with_the_banner() {
        let grid = GridSize::STANDARD;
        let frame = ExplosionFrame::new(0).expect("frame exists");
        let composed = compose_explosion(grid, PlayerPosition::spawn_point(grid), frame);
        assert_eq!(composed.lines().len(), grid.height() as usize + 4);
        assert_eq!(composed.lines()[grid.height() as usize + 1], "#".repeat(42));
        assert_eq!(composed.lines().last().map(String::as_str), Some(BOOM_BANNER));
    }

    #[test]
    fn game_over_reports_score_and_difficulty() {
        let summary = GameSummary {
            score: Score::new(42),
            difficulty: Difficulty::for_score(Score::new(42), GridSize::STANDARD),
        };
        let text = compose_game_over(&summary).to_string();

        assert!(text.contains("GAME OVER!"));
        assert!(text.contains("Your Score: 42"));
        assert!(text.contains("Difficulty: 5 "));
    }

    #[test]
    fn instructions_start_with_the_banner() {
        let frame = compose_instructions("=== banner ===");
        assert_eq!(frame.lines()[0], "=== banner ===");
        assert_eq!(frame.lines().len(), 6);
    }
}
