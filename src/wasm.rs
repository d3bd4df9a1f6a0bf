//! JavaScript-facing wrapper around [`GameInstance`].
//!
//! Structured values cross the boundary through `serde-wasm-bindgen`;
//! every [`GameError`](crate::error::GameError) becomes a thrown `Error`.

use wasm_bindgen::prelude::*;

use crate::game::{GameConfig, GameInstance};
use crate::types::GamePhase;

#[wasm_bindgen]
pub struct WasmGame {
    inner: GameInstance,
}

#[wasm_bindgen]
impl WasmGame {
    /// `config` is `{ human_color: "Black" | "White" }`; `undefined` means defaults.
    #[wasm_bindgen(constructor)]
    pub fn new(config: JsValue) -> Result<WasmGame, JsError> {
        let config: GameConfig = if config.is_undefined() || config.is_null() {
            GameConfig::default()
        } else {
            serde_wasm_bindgen::from_value(config).map_err(to_js_error)?
        };
        Ok(WasmGame {
            inner: GameInstance::new_with_default_selector(config),
        })
    }

    /// Human click. Leaves the game in the flip step; call `advance` next.
    pub fn place(&mut self, row: u8, col: u8) -> Result<(), JsError> {
        self.inner.place(row, col)?;
        Ok(())
    }

    /// Single transitions, for hosts that animate each step.
    #[wasm_bindgen(js_name = resolveFlips)]
    pub fn resolve_flips(&mut self) -> Result<JsValue, JsError> {
        let flipped = self.inner.resolve_flips()?;
        serde_wasm_bindgen::to_value(&flipped).map_err(to_js_error)
    }

    #[wasm_bindgen(js_name = changeTurn)]
    pub fn change_turn(&mut self) -> Result<JsValue, JsError> {
        let phase = self.inner.change_turn()?;
        phase_value(phase)
    }

    pub fn pass(&mut self) -> Result<JsValue, JsError> {
        let phase = self.inner.pass()?;
        phase_value(phase)
    }

    #[wasm_bindgen(js_name = playAi)]
    pub fn play_ai(&mut self) -> Result<JsValue, JsError> {
        let pos = self.inner.play_ai()?;
        serde_wasm_bindgen::to_value(&pos).map_err(to_js_error)
    }

    /// Runs automatic steps until the human must act or the game ends.
    pub fn advance(&mut self) -> Result<JsValue, JsError> {
        self.inner.advance()?;
        self.state()
    }

    pub fn state(&self) -> Result<JsValue, JsError> {
        serde_wasm_bindgen::to_value(&self.inner.to_game_state()).map_err(to_js_error)
    }

    #[wasm_bindgen(js_name = legalMoves)]
    pub fn legal_moves(&self) -> Result<JsValue, JsError> {
        serde_wasm_bindgen::to_value(&self.inner.legal_moves()).map_err(to_js_error)
    }

    pub fn result(&self) -> Result<JsValue, JsError> {
        serde_wasm_bindgen::to_value(&self.inner.to_game_result()).map_err(to_js_error)
    }

    pub fn restart(&mut self) {
        self.inner.restart();
    }

    #[wasm_bindgen(js_name = changeFirstPlayer)]
    pub fn change_first_player(&mut self) {
        self.inner.change_first_player();
    }
}

fn phase_value(phase: GamePhase) -> Result<JsValue, JsError> {
    serde_wasm_bindgen::to_value(&phase).map_err(to_js_error)
}

fn to_js_error(err: serde_wasm_bindgen::Error) -> JsError {
    JsError::new(&err.to_string())
}
