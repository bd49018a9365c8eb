//! On-screen keyboard layouts.

use super::keys::VirtualKey;
use crate::models::InputType;

/// Which key set a text keyboard shows.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Layer {
    #[default]
    Default,
    Shift,
    Numbers,
}

const NUMBER_PAD: &[&str] = &["1 2 3 4 5", "6 7 8 9 0", "{bksp} {done}"];

const TEXT_DEFAULT: &[&str] = &[
    "q w e r t y u i o p",
    "a s d f g h j k l",
    "{shift} z x c v b n m {bksp}",
    "{numbers} {space} {done}",
];

const TEXT_SHIFT: &[&str] = &[
    "Q W E R T Y U I O P",
    "A S D F G H J K L",
    "{shift} Z X C V B N M {bksp}",
    "{numbers} {space} {done}",
];

const TEXT_NUMBERS: &[&str] = &[
    "1 2 3 4 5 6 7 8 9 0",
    "- / : ; ( ) $ & @ \"",
    "{abc} . , ? ! ' {bksp}",
    "{abc} {space} {done}",
];

/// Raw token rows for an input type and layer. Number inputs always get
/// the number pad.
pub fn rows(input_type: InputType, layer: Layer) -> &'static [&'static str] {
    if input_type == InputType::Number {
        return NUMBER_PAD;
    }
    match layer {
        Layer::Default => TEXT_DEFAULT,
        Layer::Shift => TEXT_SHIFT,
        Layer::Numbers => TEXT_NUMBERS,
    }
}

/// Parsed key rows.
pub fn keys(input_type: InputType, layer: Layer) -> Vec<Vec<VirtualKey>> {
    rows(input_type, layer)
        .iter()
        .map(|row| row.split(' ').filter_map(VirtualKey::from_token).collect())
        .collect()
}

/// Whether a physically typed key exists on any layer for `input_type`.
/// Control keys (backspace, done, escape, layer switches) always pass.
pub fn accepts(input_type: InputType, key: VirtualKey) -> bool {
    match key {
        VirtualKey::Char(_) | VirtualKey::Space => [Layer::Default, Layer::Shift, Layer::Numbers]
            .into_iter()
            .any(|layer| keys(input_type, layer).iter().flatten().any(|k| *k == key)),
        _ => true,
    }
}

/// Layer after pressing a layer key; `None` for ordinary keys.
pub fn switch_layer(current: Layer, key: VirtualKey) -> Option<Layer> {
    match key {
        VirtualKey::Shift => Some(if current == Layer::Default {
            Layer::Shift
        } else {
            Layer::Default
        }),
        VirtualKey::Numbers => Some(Layer::Numbers),
        VirtualKey::Abc => Some(Layer::Default),
        _ => None,
    }
}
