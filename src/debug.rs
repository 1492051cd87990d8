//! A keyboard driven debug panel of numeric bindings.
//!
//! Each [`NumberBinding`] is a named property path with a getter/setter pair into
//! some target value. Writes are snapped to the binding's step and clamped to its
//! range before they reach the target.
//!
//! Keys: `Tab` / `Shift+Tab` select the next/previous field, arrow keys nudge the
//! selected field by one step (ten with `Shift`), `H` shows or hides the panel.
//! The panel reports through the log.

use std::fmt::Write as _;

use winit::{
    event::{ElementState, KeyEvent, WindowEvent},
    keyboard::{Key, ModifiersState, NamedKey},
};

pub struct NumberBinding<T> {
    pub label: &'static str,
    /// Property path shown in the panel, e.g. `position.x`.
    pub path: &'static str,
    get: fn(&T) -> f32,
    set: fn(&mut T, f32),
    pub min: Option<f32>,
    pub max: Option<f32>,
    pub step: f32,
}

impl<T> NumberBinding<T> {
    pub fn new(label: &'static str, path: &'static str, get: fn(&T) -> f32, set: fn(&mut T, f32)) -> Self {
        Self {
            label,
            path,
            get,
            set,
            min: None,
            max: None,
            step: 0.1,
        }
    }

    pub fn min(mut self, min: f32) -> Self {
        self.min = Some(min);
        self
    }

    pub fn max(mut self, max: f32) -> Self {
        self.max = Some(max);
        self
    }

    pub fn step(mut self, step: f32) -> Self {
        self.step = step;
        self
    }

    pub fn get(&self, target: &T) -> f32 {
        (self.get)(target)
    }

    /// Snap to the step grid anchored at the lower bound (or the upper one if there
    /// is no lower bound), then clamp into the range.
    pub fn constrain(&self, value: f32) -> f32 {
        let mut value = value;
        if self.step > 0.0 {
            let offset = self.min.or(self.max).unwrap_or(0.0);
            value = ((value - offset) / self.step).round() * self.step + offset;
        }
        if let Some(min) = self.min {
            value = value.max(min);
        }
        if let Some(max) = self.max {
            value = value.min(max);
        }
        value
    }

    /// Write `value` to the target and return what was actually stored.
    /// Non-finite values are ignored.
    pub fn set(&self, target: &mut T, value: f32) -> f32 {
        if !value.is_finite() {
            return self.get(target);
        }
        let value = self.constrain(value);
        (self.set)(target, value);
        value
    }

    /// Move the value by `steps` steps.
    pub fn nudge(&self, target: &mut T, steps: f32) -> f32 {
        let current = self.get(target);
        self.set(target, current + steps * self.step)
    }
}

pub struct Folder<T> {
    pub name: &'static str,
    pub bindings: Vec<NumberBinding<T>>,
}

pub struct DebugPanel<T> {
    title: &'static str,
    folders: Vec<Folder<T>>,
    selected: usize,
    visible: bool,
    modifiers: ModifiersState,
}

impl<T> DebugPanel<T> {
    pub fn new(title: &'static str) -> Self {
        Self {
            title,
            folders: Vec::new(),
            selected: 0,
            visible: true,
            modifiers: ModifiersState::empty(),
        }
    }

    pub fn folder(mut self, name: &'static str, bindings: Vec<NumberBinding<T>>) -> Self {
        self.folders.push(Folder { name, bindings });
        self
    }

    pub fn len(&self) -> usize {
        self.folders.iter().map(|f| f.bindings.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Look a field up by folder name and property path.
    pub fn binding(&self, folder: &str, path: &str) -> Option<&NumberBinding<T>> {
        self.folders
            .iter()
            .filter(|f| f.name == folder)
            .flat_map(|f| f.bindings.iter())
            .find(|b| b.path == path)
    }

    fn fields(&self) -> impl Iterator<Item = (&'static str, &NumberBinding<T>)> {
        self.folders
            .iter()
            .flat_map(|f| f.bindings.iter().map(move |b| (f.name, b)))
    }

    /// The selected field as (folder name, binding).
    pub fn selected(&self) -> Option<(&'static str, &NumberBinding<T>)> {
        self.fields().nth(self.selected)
    }

    pub fn select_next(&mut self) {
        let len = self.len();
        if len > 0 {
            self.selected = (self.selected + 1) % len;
        }
    }

    pub fn select_previous(&mut self) {
        let len = self.len();
        if len > 0 {
            self.selected = (self.selected + len - 1) % len;
        }
    }

    pub fn nudge_selected(&self, target: &mut T, steps: f32) -> Option<f32> {
        self.selected().map(|(_, binding)| binding.nudge(target, steps))
    }

    pub fn toggle(&mut self) -> bool {
        self.visible = !self.visible;
        self.visible
    }

    /// Multi-line listing of every folder and value, the selected field marked with `>`.
    pub fn describe(&self, target: &T) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "{}", self.title);
        let mut index = 0;
        for folder in &self.folders {
            let _ = writeln!(out, "  {}", folder.name);
            for binding in &folder.bindings {
                let marker = if index == self.selected { '>' } else { ' ' };
                let _ = writeln!(
                    out,
                    "  {} {:<10} {:>8.3}",
                    marker,
                    binding.label,
                    binding.get(target)
                );
                index += 1;
            }
        }
        out
    }

    /// Handle panel keys. Returns `true` if the target was modified.
    pub fn handle_window_events(&mut self, event: &WindowEvent, target: &mut T) -> bool {
        match event {
            WindowEvent::ModifiersChanged(modifiers) => {
                self.modifiers = modifiers.state();
                false
            }
            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        logical_key,
                        state: ElementState::Pressed,
                        ..
                    },
                ..
            } => self.handle_key(logical_key, target),
            _ => false,
        }
    }

    fn handle_key(&mut self, key: &Key, target: &mut T) -> bool {
        if let Key::Character(c) = key {
            if c.eq_ignore_ascii_case("h") {
                if self.toggle() {
                    log::info!("\n{}", self.describe(target));
                } else {
                    log::info!("{} hidden", self.title);
                }
            }
            return false;
        }
        if !self.visible {
            return false;
        }
        let shift = self.modifiers.shift_key();
        let steps = if shift { 10.0 } else { 1.0 };
        let change = match key {
            Key::Named(NamedKey::Tab) => {
                if shift {
                    self.select_previous();
                } else {
                    self.select_next();
                }
                if let Some((folder, binding)) = self.selected() {
                    log::info!("{} / {} = {}", folder, binding.label, binding.get(target));
                }
                return false;
            }
            Key::Named(NamedKey::ArrowUp | NamedKey::ArrowRight) => steps,
            Key::Named(NamedKey::ArrowDown | NamedKey::ArrowLeft) => -steps,
            _ => return false,
        };
        match self.selected() {
            Some((folder, binding)) => {
                let value = binding.nudge(target, change);
                log::info!("{} / {} = {}", folder, binding.label, value);
                true
            }
            None => false,
        }
    }
}
