// crates/stillkit-ui/src/modules/waveform.rs
//
// The waveform view for the mixer: peak columns, the selected region overlay,
// and the drag interactions that edit it.
//
// The widget keeps a local Region mirror of the selection so a drag in
// progress paints exactly under the pointer. While no drag session is active
// the mirror is re-synced from state every frame; commands are the only way
// edits flow back (SetRegion / SetRegionStart / SetRegionEnd), and they are
// emitted only when a value actually changed.

use crate::theme::{ACCENT, DARK_BG_0, DARK_TEXT_DIM, REGION_FILL, WAVE};
use egui::{Id, Pos2, Rect, Response, Sense, Stroke, Ui};
use stillkit_core::commands::ToolCommand;
use stillkit_core::selection::AudioSelection;
use stillkit_core::state::WaveformData;

const WAVE_HEIGHT:    f32 = 120.0;
const HANDLE_WIDTH:   f32 = 10.0;
const MIN_WAVE_WIDTH: f32 = 16.0;

/// Local mirror of the selection's trim boundaries, in seconds.
#[derive(Clone, Copy, PartialEq)]
struct Region {
    start: f64,
    end:   f64,
}

/// What an active drag is moving.
#[derive(Clone, Copy)]
enum DragTarget {
    /// Fresh region being swept out from `anchor`. Replaces any prior region.
    Create { anchor: f64 },
    StartHandle,
    EndHandle,
}

/// One pointer gesture, acquired on drag start and released on drag stop.
/// Exists so acquire/release stay symmetric: a session is created in exactly
/// one place and cleared in exactly one place.
#[derive(Clone, Copy)]
struct DragSession {
    target: DragTarget,
}

pub struct WaveformView {
    region: Option<Region>,
    drag:   Option<DragSession>,
}

impl WaveformView {
    pub fn new() -> Self {
        Self { region: None, drag: None }
    }

    /// Forget the mirrored region and any in-flight gesture. Called when the
    /// audio is replaced or the user leaves the mixer screen.
    pub fn reset(&mut self) {
        self.region = None;
        self.drag   = None;
    }

    /// Draw the waveform and handle region edits.
    ///
    /// `zoom` is horizontal pixels per second; 0 means fit-to-width.
    pub fn ui(
        &mut self,
        ui:        &mut Ui,
        data:      &WaveformData,
        selection: &AudioSelection,
        zoom:      f32,
        cmd:       &mut Vec<ToolCommand>,
    ) {
        // Outside a gesture the state layer owns the truth.
        if self.drag.is_none() {
            self.region = Some(Region {
                start: selection.start_seconds,
                end:   selection.end_seconds,
            });
        }

        egui::ScrollArea::horizontal()
            .id_salt("waveform_scroll")
            .auto_shrink([false, true])
            .drag_to_scroll(false)
            .show(ui, |ui| {
                let avail_w = ui.available_width();
                let wave_w = if zoom > 0.0 {
                    (data.duration as f32 * zoom).max(MIN_WAVE_WIDTH)
                } else {
                    avail_w.max(MIN_WAVE_WIDTH)
                };

                let (rect, body) = ui.allocate_exact_size(
                    egui::vec2(wave_w, WAVE_HEIGHT),
                    Sense::click_and_drag(),
                );
                if !ui.is_rect_visible(rect) {
                    return;
                }

                let painter = ui.painter_at(rect);
                painter.rect_filled(rect, 3.0, DARK_BG_0);
                let mid_y = rect.center().y;
                painter.line_segment(
                    [Pos2::new(rect.min.x, mid_y), Pos2::new(rect.max.x, mid_y)],
                    Stroke::new(1.0, DARK_TEXT_DIM.linear_multiply(0.3)),
                );
                draw_peaks(&painter, rect, &data.peaks);

                // Region overlay and its two grab handles.
                let mut start_resp: Option<Response> = None;
                let mut end_resp:   Option<Response> = None;
                if let Some(region) = self.region {
                    let x0 = x_at_time(region.start, rect.min.x, rect.width(), data.duration);
                    let x1 = x_at_time(region.end,   rect.min.x, rect.width(), data.duration);

                    painter.rect_filled(
                        Rect::from_min_max(Pos2::new(x0, rect.min.y), Pos2::new(x1, rect.max.y)),
                        0.0,
                        REGION_FILL,
                    );
                    painter.line_segment(
                        [Pos2::new(x0, rect.min.y), Pos2::new(x0, rect.max.y)],
                        Stroke::new(2.0, ACCENT),
                    );
                    painter.line_segment(
                        [Pos2::new(x1, rect.min.y), Pos2::new(x1, rect.max.y)],
                        Stroke::new(2.0, ACCENT),
                    );
                    draw_grip(&painter, x0, mid_y);
                    draw_grip(&painter, x1, mid_y);

                    let start_rect = handle_rect(rect, x0);
                    let end_rect   = handle_rect(rect, x1);
                    // Registered after the body so the handles win pointer hits.
                    start_resp = Some(ui.interact(start_rect, Id::new("region_start"), Sense::drag()));
                    end_resp   = Some(ui.interact(end_rect,   Id::new("region_end"),   Sense::drag()));
                }

                // ── Acquire ──────────────────────────────────────────────────
                if self.drag.is_none() {
                    if start_resp.as_ref().is_some_and(|r| r.drag_started()) {
                        self.drag = Some(DragSession { target: DragTarget::StartHandle });
                    } else if end_resp.as_ref().is_some_and(|r| r.drag_started()) {
                        self.drag = Some(DragSession { target: DragTarget::EndHandle });
                    } else if body.drag_started() {
                        if let Some(ptr) = body.interact_pointer_pos() {
                            let anchor =
                                time_at_x(ptr.x, rect.min.x, rect.width(), data.duration);
                            // A new sweep replaces any existing region.
                            self.region = Some(Region { start: anchor, end: anchor });
                            self.drag =
                                Some(DragSession { target: DragTarget::Create { anchor } });
                        }
                    }
                }

                // ── Update ───────────────────────────────────────────────────
                if let Some(DragSession { target }) = self.drag {
                    match target {
                        DragTarget::Create { anchor } => {
                            if let Some(ptr) = body.interact_pointer_pos() {
                                let t =
                                    time_at_x(ptr.x, rect.min.x, rect.width(), data.duration);
                                let (lo, hi) = ordered(anchor, t);
                                let next = Region { start: lo, end: hi };
                                if self.region != Some(next) {
                                    self.region = Some(next);
                                    cmd.push(ToolCommand::SetRegion { start: lo, end: hi });
                                }
                            }
                        }
                        DragTarget::StartHandle => {
                            if let Some(ptr) =
                                start_resp.as_ref().and_then(|r| r.interact_pointer_pos())
                            {
                                let t =
                                    time_at_x(ptr.x, rect.min.x, rect.width(), data.duration);
                                let clamped = selection.clamp_start(t);
                                if let Some(region) = &mut self.region {
                                    if region.start != clamped {
                                        region.start = clamped;
                                        cmd.push(ToolCommand::SetRegionStart(clamped));
                                    }
                                }
                            }
                        }
                        DragTarget::EndHandle => {
                            if let Some(ptr) =
                                end_resp.as_ref().and_then(|r| r.interact_pointer_pos())
                            {
                                let t =
                                    time_at_x(ptr.x, rect.min.x, rect.width(), data.duration);
                                let clamped = selection.clamp_end(t);
                                if let Some(region) = &mut self.region {
                                    if region.end != clamped {
                                        region.end = clamped;
                                        cmd.push(ToolCommand::SetRegionEnd(clamped));
                                    }
                                }
                            }
                        }
                    }
                }

                // ── Release ──────────────────────────────────────────────────
                let stopped = body.drag_stopped()
                    || start_resp.as_ref().is_some_and(|r| r.drag_stopped())
                    || end_resp.as_ref().is_some_and(|r| r.drag_stopped());
                if stopped {
                    self.drag = None;
                }

                // ── Cursor ───────────────────────────────────────────────────
                let on_handle = start_resp.as_ref().is_some_and(|r| r.hovered())
                    || end_resp.as_ref().is_some_and(|r| r.hovered());
                let dragging_handle = matches!(
                    self.drag,
                    Some(DragSession { target: DragTarget::StartHandle })
                        | Some(DragSession { target: DragTarget::EndHandle })
                );
                if on_handle || dragging_handle {
                    ui.ctx().set_cursor_icon(egui::CursorIcon::ResizeHorizontal);
                } else if body.hovered() || body.dragged() {
                    ui.ctx().set_cursor_icon(egui::CursorIcon::Crosshair);
                }
            });
    }
}

fn draw_peaks(painter: &egui::Painter, rect: Rect, peaks: &[f32]) {
    if peaks.is_empty() {
        return;
    }
    let w     = rect.width();
    let h     = rect.height();
    let mid_y = rect.center().y;
    // One column per horizontal pixel, capped at the stored resolution.
    let visible = (w as usize).min(peaks.len()).max(1);
    let step    = peaks.len() as f32 / visible as f32;
    let px      = w / visible as f32;
    for i in 0..visible {
        let idx  = ((i as f32 * step) as usize).min(peaks.len() - 1);
        let half = (peaks[idx] * h * 0.44).max(0.5);
        let x    = rect.min.x + (i as f32 + 0.5) * px;
        painter.line_segment(
            [Pos2::new(x, mid_y - half), Pos2::new(x, mid_y + half)],
            Stroke::new(px.max(1.0), WAVE),
        );
    }
}

fn draw_grip(painter: &egui::Painter, x: f32, mid_y: f32) {
    let grip = Rect::from_center_size(Pos2::new(x, mid_y), egui::vec2(4.0, 26.0));
    painter.rect_filled(grip, 2.0, egui::Color32::from_rgba_unmultiplied(255, 255, 255, 160));
}

fn handle_rect(rect: Rect, x: f32) -> Rect {
    Rect::from_center_size(
        Pos2::new(x, rect.center().y),
        egui::vec2(HANDLE_WIDTH, rect.height()),
    )
}

/// Pointer x to time: proportional across the drawn width, clamped to the
/// asset. The region can therefore never be swept outside [0, duration].
fn time_at_x(x: f32, rect_min_x: f32, rect_width: f32, duration: f64) -> f64 {
    if rect_width <= 0.0 || duration <= 0.0 {
        return 0.0;
    }
    let frac = ((x - rect_min_x) / rect_width).clamp(0.0, 1.0) as f64;
    frac * duration
}

fn x_at_time(t: f64, rect_min_x: f32, rect_width: f32, duration: f64) -> f32 {
    if duration <= 0.0 {
        return rect_min_x;
    }
    let frac = (t / duration).clamp(0.0, 1.0) as f32;
    rect_min_x + frac * rect_width
}

fn ordered(a: f64, b: f64) -> (f64, f64) {
    if a <= b { (a, b) } else { (b, a) }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pointer_time_is_proportional() {
        assert_eq!(time_at_x(0.0, 0.0, 400.0, 20.0), 0.0);
        assert!((time_at_x(100.0, 0.0, 400.0, 20.0) - 5.0).abs() < 1e-6);
        assert!((time_at_x(400.0, 0.0, 400.0, 20.0) - 20.0).abs() < 1e-6);
    }

    #[test]
    fn pointer_time_respects_rect_origin() {
        assert!((time_at_x(150.0, 100.0, 200.0, 8.0) - 2.0).abs() < 1e-6);
    }

    #[test]
    fn pointer_outside_rect_clamps_to_asset() {
        assert_eq!(time_at_x(-50.0, 0.0, 400.0, 20.0), 0.0);
        assert_eq!(time_at_x(900.0, 0.0, 400.0, 20.0), 20.0);
    }

    #[test]
    fn x_and_time_round_trip() {
        let (min_x, w, dur) = (12.0_f32, 640.0_f32, 33.5_f64);
        for t in [0.0, 1.0, 12.25, 33.5] {
            let x = x_at_time(t, min_x, w, dur);
            assert!((time_at_x(x, min_x, w, dur) - t).abs() < 1e-3);
        }
    }

    #[test]
    fn degenerate_geometry_maps_to_zero() {
        assert_eq!(time_at_x(50.0, 0.0, 0.0, 20.0), 0.0);
        assert_eq!(time_at_x(50.0, 0.0, 400.0, 0.0), 0.0);
        assert_eq!(x_at_time(5.0, 10.0, 400.0, 0.0), 10.0);
    }

    #[test]
    fn sweep_bounds_are_ordered() {
        assert_eq!(ordered(3.0, 7.0), (3.0, 7.0));
        assert_eq!(ordered(7.0, 3.0), (3.0, 7.0));
        assert_eq!(ordered(5.0, 5.0), (5.0, 5.0));
    }
}
