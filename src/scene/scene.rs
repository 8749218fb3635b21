use glam::{DMat4, DVec3};
use indexmap::IndexMap;
use smallvec::SmallVec;

use crate::axes::PolarAxesActor;
use crate::core::{Viewport, face_normal};
use crate::error::{SceneError, SceneResult};
use crate::render::{Color, DepthLine, RenderFrame, ScreenText, ShadedTriangle, TextHAlign};
use crate::scene::camera::{ProjectedPoint, project_through};
use crate::scene::{
    Actor, Camera, Light, LineActor, LineProperty, Representation, SurfaceProperty,
};

/// Assembled scene: camera, lights, actors, and polar-axes overlays.
///
/// Actors are kept in insertion-ordered maps so frame construction is
/// deterministic for a fixed scene.
#[derive(Debug, Clone)]
pub struct Scene {
    pub background: Color,
    camera: Camera,
    lights: Vec<Light>,
    mesh_actors: IndexMap<String, Actor>,
    line_actors: IndexMap<String, LineActor>,
    polar_axes: Vec<PolarAxesActor>,
}

impl Default for Scene {
    fn default() -> Self {
        Self::new(Color::BLACK)
    }
}

impl Scene {
    #[must_use]
    pub fn new(background: Color) -> Self {
        Self {
            background,
            camera: Camera::default(),
            lights: Vec::new(),
            mesh_actors: IndexMap::new(),
            line_actors: IndexMap::new(),
            polar_axes: Vec::new(),
        }
    }

    #[must_use]
    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    #[must_use]
    pub fn camera_mut(&mut self) -> &mut Camera {
        &mut self.camera
    }

    pub fn set_camera(&mut self, camera: Camera) {
        self.camera = camera;
    }

    pub fn add_light(&mut self, light: Light) {
        self.lights.push(light);
    }

    #[must_use]
    pub fn lights(&self) -> &[Light] {
        &self.lights
    }

    pub fn add_mesh_actor(&mut self, name: impl Into<String>, actor: Actor) {
        self.mesh_actors.insert(name.into(), actor);
    }

    #[must_use]
    pub fn mesh_actor(&self, name: &str) -> Option<&Actor> {
        self.mesh_actors.get(name)
    }

    #[must_use]
    pub fn mesh_actor_mut(&mut self, name: &str) -> Option<&mut Actor> {
        self.mesh_actors.get_mut(name)
    }

    pub fn add_line_actor(&mut self, name: impl Into<String>, actor: LineActor) {
        self.line_actors.insert(name.into(), actor);
    }

    #[must_use]
    pub fn line_actor(&self, name: &str) -> Option<&LineActor> {
        self.line_actors.get(name)
    }

    pub fn add_polar_axes(&mut self, axes: PolarAxesActor) {
        self.polar_axes.push(axes);
    }

    #[must_use]
    pub fn polar_axes(&self) -> &[PolarAxesActor] {
        &self.polar_axes
    }

    /// Projects every visible prop through the camera into a depth-carrying
    /// render frame.
    pub fn build_frame(
        &self,
        viewport: Viewport,
        draw_overlay_labels: bool,
    ) -> SceneResult<RenderFrame> {
        if !viewport.is_valid() {
            return Err(SceneError::InvalidViewport {
                width: viewport.width,
                height: viewport.height,
            });
        }
        self.background.validate()?;
        self.camera.validate()?;
        for light in &self.lights {
            light.validate()?;
        }

        let headlight = [Light::headlight(&self.camera)];
        let lights: &[Light] = if self.lights.is_empty() {
            &headlight
        } else {
            &self.lights
        };

        let mut builder = FrameBuilder::new(&self.camera, viewport, self.background);

        for (name, actor) in &self.mesh_actors {
            if !actor.visible {
                continue;
            }
            actor.property.validate()?;
            actor.mesh.validate()?;
            match actor.property.representation {
                Representation::Surface => builder.push_surface(actor, lights),
                Representation::Wireframe => builder.push_mesh_wireframe(actor),
            }
            tracing::trace!(actor = name.as_str(), "projected mesh actor");
        }

        for (name, actor) in &self.line_actors {
            if !actor.visible {
                continue;
            }
            actor.property.validate()?;
            for segment in &actor.segments {
                builder.push_world_line(segment[0], segment[1], &actor.property);
            }
            tracing::trace!(actor = name.as_str(), "projected line actor");
        }

        for axes in &self.polar_axes {
            if !axes.visible {
                continue;
            }
            builder.push_polar_axes(axes, draw_overlay_labels)?;
        }

        tracing::debug!(
            triangles = builder.frame.triangles.len(),
            lines = builder.frame.lines.len(),
            texts = builder.frame.texts.len(),
            "assembled render frame"
        );

        Ok(builder.frame)
    }
}

/// View-space vertex paired with its shaded color, for near-plane clipping.
type ClipVertex = (DVec3, Color);

struct FrameBuilder<'a> {
    camera: &'a Camera,
    viewport: Viewport,
    view_from_world: DMat4,
    clip_from_view: DMat4,
    near: f64,
    frame: RenderFrame,
}

impl<'a> FrameBuilder<'a> {
    fn new(camera: &'a Camera, viewport: Viewport, background: Color) -> Self {
        Self {
            camera,
            viewport,
            view_from_world: camera.view_matrix(),
            clip_from_view: camera.projection_matrix(viewport.aspect_ratio()),
            near: camera.clipping_range.0,
            frame: RenderFrame::new(viewport, background),
        }
    }

    fn to_view(&self, point: DVec3) -> DVec3 {
        self.view_from_world.transform_point3(point)
    }

    fn project_view(&self, point: DVec3) -> Option<ProjectedPoint> {
        project_through(self.clip_from_view, point, self.viewport)
    }

    fn project_world(&self, point: DVec3) -> Option<ProjectedPoint> {
        self.project_view(self.to_view(point))
    }

    fn push_surface(&mut self, actor: &Actor, lights: &[Light]) {
        let mesh = &actor.mesh;
        for index in 0..mesh.triangle_count() {
            let corners = mesh.triangle_points(index);
            let Some(fallback_normal) = face_normal(corners[0], corners[1], corners[2]) else {
                continue;
            };

            let [a, b, c] = mesh.triangles[index];
            let normals = match &mesh.normals {
                Some(normals) => [
                    normals[a as usize],
                    normals[b as usize],
                    normals[c as usize],
                ],
                None => [fallback_normal; 3],
            };

            let mut polygon: SmallVec<[ClipVertex; 4]> = SmallVec::new();
            for (corner, normal) in corners.iter().zip(normals) {
                let color = shade_vertex(
                    &actor.property,
                    *corner,
                    normal,
                    self.camera.position,
                    lights,
                );
                polygon.push((self.to_view(*corner), color));
            }

            self.push_clipped_polygon(polygon);
        }
    }

    fn push_mesh_wireframe(&mut self, actor: &Actor) {
        let property = LineProperty::new(
            actor.property.diffuse_color,
            actor.property.line_width,
        );
        for index in 0..actor.mesh.triangle_count() {
            let [a, b, c] = actor.mesh.triangle_points(index);
            self.push_world_line(a, b, &property);
            self.push_world_line(b, c, &property);
            self.push_world_line(c, a, &property);
        }
    }

    /// Near-clips a view-space polygon and fan-triangulates the remainder.
    fn push_clipped_polygon(&mut self, polygon: SmallVec<[ClipVertex; 4]>) {
        let clipped = clip_near(polygon, self.near);
        if clipped.len() < 3 {
            return;
        }

        let mut projected: SmallVec<[(ProjectedPoint, Color); 4]> = SmallVec::new();
        for (position, color) in clipped {
            let Some(point) = self.project_view(position) else {
                return;
            };
            projected.push((point, color));
        }

        for index in 1..projected.len() - 1 {
            let (p0, c0) = projected[0];
            let (p1, c1) = projected[index];
            let (p2, c2) = projected[index + 1];
            self.frame.triangles.push(ShadedTriangle::new(
                [(p0.x, p0.y), (p1.x, p1.y), (p2.x, p2.y)],
                [p0.depth, p1.depth, p2.depth],
                [c0, c1, c2],
            ));
        }
    }

    fn push_world_line(&mut self, start: DVec3, end: DVec3, property: &LineProperty) {
        let mut a = self.to_view(start);
        let mut b = self.to_view(end);
        let limit = -self.near;

        // View space looks down -Z; clip the segment to z <= -near.
        if a.z > limit && b.z > limit {
            return;
        }
        if a.z > limit {
            let t = (limit - a.z) / (b.z - a.z);
            a = a.lerp(b, t);
        } else if b.z > limit {
            let t = (limit - b.z) / (a.z - b.z);
            b = b.lerp(a, t);
        }

        let (Some(p1), Some(p2)) = (self.project_view(a), self.project_view(b)) else {
            return;
        };
        self.frame.lines.push(DepthLine::new(
            p1.x,
            p1.y,
            p1.depth,
            p2.x,
            p2.y,
            p2.depth,
            property.width,
            property.color,
        ));
    }

    fn push_polyline(&mut self, points: &[DVec3], property: &LineProperty) {
        for pair in points.windows(2) {
            self.push_world_line(pair[0], pair[1], property);
        }
    }

    fn push_label(
        &mut self,
        text: &str,
        anchor: DVec3,
        glyph_size_px: f64,
        color: Color,
        offset_factor: f64,
    ) {
        if text.is_empty() {
            return;
        }
        let Some(point) = self.project_world(anchor) else {
            return;
        };
        if !(0.0..=1.0).contains(&point.depth) {
            return;
        }
        self.frame.texts.push(ScreenText::new(
            text,
            point.x,
            point.y + glyph_size_px * offset_factor,
            point.depth,
            glyph_size_px,
            color,
            TextHAlign::Center,
        ));
    }

    fn push_polar_axes(
        &mut self,
        axes: &PolarAxesActor,
        draw_overlay_labels: bool,
    ) -> SceneResult<()> {
        let geometry = axes.build_geometry()?;

        self.push_world_line(
            geometry.polar_axis[0],
            geometry.polar_axis[1],
            &axes.polar_axis_property,
        );
        for segment in &geometry.radial_axes {
            self.push_world_line(segment[0], segment[1], &axes.radial_axes_property);
        }
        for arc in &geometry.arcs {
            self.push_polyline(arc, &axes.polar_arcs_property);
        }
        for tick in &geometry.tick_marks {
            self.push_world_line(tick[0], tick[1], &axes.polar_axis_property);
        }

        if draw_overlay_labels {
            for label in &geometry.labels {
                self.push_label(
                    &label.text,
                    label.anchor,
                    axes.screen_size,
                    axes.label_text.color,
                    1.6,
                );
            }
            self.push_label(
                &geometry.title.text,
                geometry.title.anchor,
                axes.screen_size * 4.0 / 3.0,
                axes.title_text.color,
                2.4,
            );
        }

        Ok(())
    }
}

fn shade_vertex(
    property: &SurfaceProperty,
    position: DVec3,
    normal: DVec3,
    camera_position: DVec3,
    lights: &[Light],
) -> Color {
    // Two-sided shading: light the face the camera actually sees.
    let toward_camera = camera_position - position;
    let normal = if normal.dot(toward_camera) < 0.0 {
        -normal
    } else {
        normal
    };

    let mut red = property.ambient;
    let mut green = property.ambient;
    let mut blue = property.ambient;
    for light in lights {
        let lambert = light.lambert(normal);
        red += lambert * light.color.red;
        green += lambert * light.color.green;
        blue += lambert * light.color.blue;
    }

    let diffuse = property.diffuse_color;
    Color::rgba(
        (diffuse.red * red).clamp(0.0, 1.0),
        (diffuse.green * green).clamp(0.0, 1.0),
        (diffuse.blue * blue).clamp(0.0, 1.0),
        diffuse.alpha,
    )
}

/// Sutherland-Hodgman clip of a view-space polygon against z <= -near.
fn clip_near(polygon: SmallVec<[ClipVertex; 4]>, near: f64) -> SmallVec<[ClipVertex; 4]> {
    let limit = -near;
    let mut clipped: SmallVec<[ClipVertex; 4]> = SmallVec::new();

    for index in 0..polygon.len() {
        let (current, current_color) = polygon[index];
        let (next, next_color) = polygon[(index + 1) % polygon.len()];
        let current_inside = current.z <= limit;
        let next_inside = next.z <= limit;

        if current_inside {
            clipped.push((current, current_color));
        }
        if current_inside != next_inside {
            let t = (limit - current.z) / (next.z - current.z);
            clipped.push((
                current.lerp(next, t),
                lerp_color(current_color, next_color, t),
            ));
        }
    }

    clipped
}

fn lerp_color(a: Color, b: Color, t: f64) -> Color {
    Color::rgba(
        a.red + (b.red - a.red) * t,
        a.green + (b.green - a.green) * t,
        a.blue + (b.blue - a.blue) * t,
        a.alpha + (b.alpha - a.alpha) * t,
    )
}
