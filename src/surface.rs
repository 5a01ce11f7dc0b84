// Drawing surface abstraction. The canvas implementation wraps a 2d context;
// tests swap in a recorder so rendering can be checked without a browser.

use vecmath::Vector2;
use wasm_bindgen::JsCast;
use wasm_bindgen::JsValue;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use crate::color::Color;
use crate::error::{describe_js, AnimatorError};
use crate::particle::Bounds;

pub trait Surface {
    /// Resizes the backing store. Clears it as a side effect on canvases.
    fn resize(&mut self, bounds: Bounds);

    fn clear(&mut self, bounds: Bounds);

    fn fill_circle(
        &mut self,
        center: Vector2<f64>,
        radius: f64,
        color: Color,
        alpha: f64,
    ) -> Result<(), AnimatorError>;

    fn stroke_line(
        &mut self,
        from: Vector2<f64>,
        to: Vector2<f64>,
        width: f64,
        color: Color,
        alpha: f64,
    ) -> Result<(), AnimatorError>;
}

pub struct CanvasSurface {
    canvas: HtmlCanvasElement,
    context: CanvasRenderingContext2d,
}

impl CanvasSurface {
    // Grabs the 2d context from the canvas, failing if the canvas already
    // hands out a different kind of context
    pub fn new(canvas: HtmlCanvasElement) -> Result<CanvasSurface, AnimatorError> {
        let context = canvas
            .get_context("2d")
            .map_err(|e| AnimatorError::Draw(describe_js(&e)))?
            .ok_or(AnimatorError::NoContext)?
            .dyn_into::<CanvasRenderingContext2d>()
            .map_err(|_| AnimatorError::NoContext)?;
        Ok(CanvasSurface { canvas, context })
    }
}

impl Surface for CanvasSurface {
    fn resize(&mut self, bounds: Bounds) {
        self.canvas.set_width(bounds.width);
        self.canvas.set_height(bounds.height);
    }

    fn clear(&mut self, bounds: Bounds) {
        self.context
            .clear_rect(0.0, 0.0, bounds.width as f64, bounds.height as f64);
    }

    fn fill_circle(
        &mut self,
        center: Vector2<f64>,
        radius: f64,
        color: Color,
        alpha: f64,
    ) -> Result<(), AnimatorError> {
        self.context.begin_path();
        self.context
            .arc(center[0], center[1], radius, 0.0, std::f64::consts::PI * 2.0)
            .map_err(|e| AnimatorError::Draw(describe_js(&e)))?;
        #[allow(deprecated)]
        self.context
            .set_fill_style(&JsValue::from_str(&color.to_css_rgba(alpha)));
        self.context.fill();
        Ok(())
    }

    fn stroke_line(
        &mut self,
        from: Vector2<f64>,
        to: Vector2<f64>,
        width: f64,
        color: Color,
        alpha: f64,
    ) -> Result<(), AnimatorError> {
        self.context.begin_path();
        self.context.move_to(from[0], from[1]);
        self.context.line_to(to[0], to[1]);
        #[allow(deprecated)]
        self.context
            .set_stroke_style(&JsValue::from_str(&color.to_css_rgba(alpha)));
        self.context.set_line_width(width);
        self.context.stroke();
        Ok(())
    }
}

#[cfg(test)]
pub(crate) mod recording {
    use super::*;

    #[derive(Clone, Debug, PartialEq)]
    pub enum DrawOp {
        Resize(Bounds),
        Clear(Bounds),
        Circle {
            center: Vector2<f64>,
            radius: f64,
            alpha: f64,
        },
        Line {
            from: Vector2<f64>,
            to: Vector2<f64>,
            width: f64,
            alpha: f64,
        },
    }

    /// Records every call instead of drawing.
    #[derive(Debug, Default)]
    pub struct RecordingSurface {
        pub ops: Vec<DrawOp>,
        pub fail_circles: bool,
    }

    impl RecordingSurface {
        pub fn circles(&self) -> Vec<&DrawOp> {
            self.ops
                .iter()
                .filter(|op| matches!(op, DrawOp::Circle { .. }))
                .collect()
        }

        pub fn lines(&self) -> Vec<&DrawOp> {
            self.ops
                .iter()
                .filter(|op| matches!(op, DrawOp::Line { .. }))
                .collect()
        }
    }

    impl Surface for RecordingSurface {
        fn resize(&mut self, bounds: Bounds) {
            self.ops.push(DrawOp::Resize(bounds));
        }

        fn clear(&mut self, bounds: Bounds) {
            self.ops.push(DrawOp::Clear(bounds));
        }

        fn fill_circle(
            &mut self,
            center: Vector2<f64>,
            radius: f64,
            _color: Color,
            alpha: f64,
        ) -> Result<(), AnimatorError> {
            if self.fail_circles {
                return Err(AnimatorError::Draw("arc rejected".into()));
            }
            self.ops.push(DrawOp::Circle {
                center,
                radius,
                alpha,
            });
            Ok(())
        }

        fn stroke_line(
            &mut self,
            from: Vector2<f64>,
            to: Vector2<f64>,
            width: f64,
            _color: Color,
            alpha: f64,
        ) -> Result<(), AnimatorError> {
            self.ops.push(DrawOp::Line {
                from,
                to,
                width,
                alpha,
            });
            Ok(())
        }
    }
}
