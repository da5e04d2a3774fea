//! Canvas2D rendering module
//!
//! Rendering is a pure function of game state: clear, draw the circles,
//! and draw the game-over overlay when the run has ended. Layout and
//! colors come from `ui`.

use std::f64::consts::TAU;

use anyhow::{Result, anyhow};
use glam::Vec2;
use web_sys::CanvasRenderingContext2d;

use crate::browser;
use crate::consts::{LOGICAL_HEIGHT, LOGICAL_WIDTH};
use crate::sim::GameState;
use crate::ui::{self, Palette};

pub struct Renderer {
    context: CanvasRenderingContext2d,
}

impl Renderer {
    pub fn new() -> Result<Self> {
        Ok(Self {
            context: browser::context_2d()?,
        })
    }

    /// Draw one frame of the current state
    pub fn draw(&self, state: &GameState, palette: &Palette) -> Result<()> {
        self.context
            .clear_rect(0.0, 0.0, LOGICAL_WIDTH as f64, LOGICAL_HEIGHT as f64);

        self.fill_circle(state.player.pos, state.player.radius, palette.player)?;
        for pursuer in &state.pursuers {
            self.fill_circle(pursuer.pos, pursuer.radius, palette.pursuer)?;
        }

        if state.is_over() {
            self.game_over_overlay(state.elapsed_secs, palette)?;
        }

        Ok(())
    }

    fn fill_circle(&self, pos: Vec2, radius: f32, color: &str) -> Result<()> {
        self.context.set_fill_style_str(color);
        self.context.begin_path();
        self.context
            .arc(pos.x as f64, pos.y as f64, radius as f64, 0.0, TAU)
            .map_err(|err| anyhow!("Error drawing circle: {:#?}", err))?;
        self.context.fill();
        Ok(())
    }

    fn game_over_overlay(&self, seconds: u32, palette: &Palette) -> Result<()> {
        let cx = (LOGICAL_WIDTH / 2.0) as f64;
        let cy = (LOGICAL_HEIGHT / 2.0) as f64;

        // Scrim over the whole surface
        self.context.set_fill_style_str(palette.scrim);
        self.context
            .fill_rect(0.0, 0.0, LOGICAL_WIDTH as f64, LOGICAL_HEIGHT as f64);

        self.context.set_text_align("center");

        self.context.set_fill_style_str(palette.overlay_text);
        self.context.set_font("48px Arial");
        self.fill_text("Game Over!", cx, cy)?;
        self.context.set_font("24px Arial");
        self.fill_text(&format!("Survived for {seconds} seconds"), cx, cy + 40.0)?;

        // Restart control
        let button = ui::restart_button();
        self.context.set_fill_style_str(palette.button);
        self.context.fill_rect(
            button.x as f64,
            button.y as f64,
            button.width as f64,
            button.height as f64,
        );
        self.context.set_fill_style_str(palette.button_label);
        self.context.set_font("16px Arial");
        self.fill_text(
            "Restart",
            button.center().x as f64,
            (button.y + 20.0) as f64,
        )?;

        Ok(())
    }

    fn fill_text(&self, text: &str, x: f64, y: f64) -> Result<()> {
        self.context
            .fill_text(text, x, y)
            .map_err(|err| anyhow!("Error drawing text: {:#?}", err))
    }
}
