#![cfg(target_arch = "wasm32")]

use othello_heuristic::wasm::WasmGame;
use othello_heuristic::wasm_ready;
use wasm_bindgen::JsValue;
use wasm_bindgen_test::*;

#[wasm_bindgen_test]
fn module_reports_ready() {
    assert!(wasm_ready());
}

#[wasm_bindgen_test]
fn human_move_then_advance_returns_to_human() {
    let mut game = WasmGame::new(JsValue::UNDEFINED).unwrap();

    game.place(2, 3).unwrap();
    let state = game.advance().unwrap();

    assert!(state.is_object());
}

#[wasm_bindgen_test]
fn illegal_click_throws() {
    let mut game = WasmGame::new(JsValue::UNDEFINED).unwrap();

    assert!(game.place(0, 0).is_err());
}
