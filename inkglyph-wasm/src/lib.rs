use inkglyph_core::panel::{output_entries, PanelRow};
use inkglyph_core::{
    BarPanel, Config, Counter, Frame, MemoryCounter, ParamValue, Sample, Session,
};
use inkglyph_svg::{render_blank, render_form_to_string};
use serde_json::{json, Map, Value};
use wasm_bindgen::prelude::*;

/// A drawing session driven by browser pointer events.
///
/// The host calls `tick` once per animation frame; pointer handlers only
/// record samples.
#[wasm_bindgen]
pub struct GlyphSession {
    session: Session<MemoryCounter, BarPanel>,
    config_error: Option<String>,
}

#[wasm_bindgen]
impl GlyphSession {
    /// Start a session from a JSON configuration (empty for defaults) and the
    /// visit total persisted by the host. An unusable configuration falls
    /// back to defaults and is reported through `configError`.
    #[wasm_bindgen(constructor)]
    pub fn new(config_json: &str, visits: u32) -> Self {
        let (config, config_error) = if config_json.trim().is_empty() {
            (Config::default(), None)
        } else {
            match Config::from_json_str(config_json) {
                Ok(config) => (config, None),
                Err(e) => {
                    log::warn!("using default configuration: {e}");
                    (Config::default(), Some(e.to_string()))
                }
            }
        };
        let counter = MemoryCounter::starting_at(u64::from(visits));
        Self {
            session: Session::new(config, counter, BarPanel::new()),
            config_error,
        }
    }

    #[wasm_bindgen(getter, js_name = configError)]
    pub fn config_error(&self) -> Option<String> {
        self.config_error.clone()
    }

    #[wasm_bindgen(js_name = pointerDown)]
    pub fn pointer_down(&mut self) {
        self.session.pointer_down();
    }

    /// Record a sample; `pressure` is optional for mice.
    #[wasm_bindgen(js_name = pointerMove)]
    pub fn pointer_move(&mut self, x: f64, y: f64, t: f64, pressure: Option<f64>) -> bool {
        let mut sample = Sample::new(x, y, t);
        sample.pressure = pressure;
        self.session.pointer_move(sample)
    }

    /// Commit the stroke and return the committed glyph, or the blank
    /// canvas when nothing has been drawn.
    #[wasm_bindgen(js_name = pointerUp)]
    pub fn pointer_up(&mut self) -> String {
        let render = self.session.config().render;
        match self.session.pointer_up() {
            Some(frame) => frame_svg(frame, &render),
            None => render_blank(&render),
        }
    }

    /// Run a scheduled preview. Returns the new SVG, or nothing when no
    /// recompute was pending.
    pub fn tick(&mut self) -> Option<String> {
        let render = self.session.config().render;
        self.session.tick().map(|frame| frame_svg(frame, &render))
    }

    /// Finish the glyph and return the new visit total.
    pub fn reset(&mut self) -> Option<u32> {
        self.session
            .reset()
            .map(|total| u32::try_from(total).unwrap_or(u32::MAX))
    }

    /// The canvas shown before the first stroke.
    #[wasm_bindgen(js_name = blankSvg)]
    pub fn blank_svg(&self) -> String {
        render_blank(&self.session.config().render)
    }

    pub fn visits(&self) -> u32 {
        self.session
            .counter()
            .total()
            .map_or(0, |total| u32::try_from(total).unwrap_or(u32::MAX))
    }

    /// Current stage, 0 before any run.
    pub fn stage(&self) -> u8 {
        self.session.frame().map_or(0, |f| f.disclosure.stage)
    }

    #[wasm_bindgen(js_name = jongSub)]
    pub fn jong_sub(&self) -> u8 {
        self.session.frame().map_or(0, |f| f.disclosure.jong_sub.as_u8())
    }

    /// Flattened gesture features of the latest run as a JSON object.
    #[wasm_bindgen(js_name = featuresJson)]
    pub fn features_json(&self) -> String {
        let Some(frame) = self.session.frame() else {
            return "{}".to_owned();
        };
        let map: Map<String, Value> = frame
            .features
            .entries()
            .into_iter()
            .map(|(k, v)| (k.to_owned(), json!(v)))
            .collect();
        Value::Object(map).to_string()
    }

    /// Flattened form parameters and disclosure of the latest run as a JSON
    /// object.
    #[wasm_bindgen(js_name = formJson)]
    pub fn form_json(&self) -> String {
        let Some(frame) = self.session.frame() else {
            return "{}".to_owned();
        };
        let map: Map<String, Value> = output_entries(&frame.form, &frame.disclosure)
            .into_iter()
            .map(|(k, v)| (k.to_owned(), param_to_json(v)))
            .collect();
        Value::Object(map).to_string()
    }

    /// Panel rows with display values and bar fill ratios.
    #[wasm_bindgen(js_name = panelJson)]
    pub fn panel_json(&self) -> String {
        let panel = self.session.panel();
        json!({
            "visible": panel.is_visible(),
            "gesture": rows_to_json(panel.gesture_rows()),
            "form": rows_to_json(panel.form_rows()),
        })
        .to_string()
    }
}

fn frame_svg(frame: &Frame, render: &inkglyph_core::RenderConfig) -> String {
    render_form_to_string(&frame.form, &frame.disclosure, render)
}

fn param_to_json(v: ParamValue) -> Value {
    match v {
        ParamValue::Number(n) => json!(n),
        ParamValue::Text(s) => json!(s),
    }
}

fn rows_to_json(rows: &[PanelRow]) -> Value {
    rows.iter()
        .map(|row| json!({ "key": row.key, "value": row.value, "fill": row.fill }))
        .collect()
}
