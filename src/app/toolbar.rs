//! Right-hand annotation panel: tool and defect selection, zoom, and the
//! list of marked defects.

use defect_annotate::category::{self, CATEGORIES};
use defect_annotate::shape::{ShapeId, ToolKind};
use defect_annotate::surface::SurfaceMessage;
use eframe::egui;

use super::painter::solid;
use super::DefectAnnotateApp;

pub fn show(app: &mut DefectAnnotateApp, ui: &mut egui::Ui) {
    ui.heading("Annotation Tools");
    ui.weak("Mark defect areas on the pizza");
    ui.add_space(8.0);

    ui.label("Tool");
    ui.horizontal(|ui| {
        for tool in ToolKind::ALL {
            if ui.selectable_label(app.surface.tool() == tool, tool.name()).clicked() {
                app.send(SurfaceMessage::SetTool(tool));
            }
        }
    });
    ui.weak(match app.surface.tool() {
        ToolKind::Rectangle => "Drag to draw a box",
        ToolKind::Polygon => "Click to add points; double-click or click the first point to close",
        ToolKind::Point => "Click to mark a point",
    });

    ui.separator();
    ui.label("Defect Type");
    for defect in CATEGORIES {
        let selected = app.surface.category() == defect.id;
        let text = egui::RichText::new(defect.label).color(if selected {
            egui::Color32::WHITE
        } else {
            solid(defect.color)
        });
        let mut button = egui::Button::new(text).min_size(egui::vec2(ui.available_width(), 0.0));
        if selected {
            button = button.fill(solid(defect.color));
        }
        if ui.add(button).clicked() {
            app.send(SurfaceMessage::SetCategory(defect.id.to_string()));
        }
    }

    ui.separator();
    ui.label("Zoom");
    ui.horizontal(|ui| {
        let step = app.settings.zoom_step_percent;
        if ui.button("−").clicked() {
            app.set_zoom(app.zoom_percent - step);
        }
        ui.label(format!("{:.0}%", app.zoom_percent));
        if ui.button("+").clicked() {
            app.set_zoom(app.zoom_percent + step);
        }
        if ui.button("Reset").clicked() {
            app.set_zoom(app.settings.default_zoom_percent);
        }
    });

    ui.separator();
    marked_defects(app, ui);

    ui.add_space(8.0);
    if ui
        .add_enabled(!app.shapes.is_empty(), egui::Button::new("Submit"))
        .clicked()
    {
        app.submit();
    }
}

fn marked_defects(app: &mut DefectAnnotateApp, ui: &mut egui::Ui) {
    ui.horizontal(|ui| {
        ui.label(format!("Marked Defects ({})", app.shapes.len()));
        if !app.shapes.is_empty() && ui.small_button("Clear All").clicked() {
            app.send(SurfaceMessage::ClearAll);
        }
    });

    let mut remove: Option<ShapeId> = None;
    egui::ScrollArea::vertical().max_height(240.0).show(ui, |ui| {
        for shape in app.shapes.iter() {
            ui.horizontal(|ui| {
                let (dot, _) = ui.allocate_exact_size(egui::vec2(10.0, 10.0), egui::Sense::hover());
                ui.painter().circle_filled(dot.center(), 5.0, solid(shape.color()));
                ui.label(format!(
                    "{} · {} {}",
                    category::label_for(shape.category()),
                    shape.tool().name(),
                    shape.id()
                ));
                if ui.small_button("×").on_hover_text("Remove").clicked() {
                    remove = Some(shape.id());
                }
            });
        }
    });
    if let Some(id) = remove {
        app.send(SurfaceMessage::Delete(id));
    }
}
