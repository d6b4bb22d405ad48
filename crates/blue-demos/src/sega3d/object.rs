//! A transformable 3D object that turns its model into draw commands.

use bitflags::bitflags;
use serde::{Deserialize, Serialize};

use blue_core::draw::{DrawCommand, DrawMode};
use blue_core::matrix::MatrixStack;
use blue_core::{Fix16, Fix16Vec2, Fix16Vec3, Int16Vec2};

use super::model::{ModelError, PolygonData};

/// Quads with any vertex at or in front of this depth are culled.
pub const NEAR_Z: Fix16 = Fix16::ONE;

/// Distance from the eye to the projection plane, in pixels.
pub const FOCAL_LENGTH: Fix16 = Fix16::from_int(192);

bitflags! {
    #[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
    pub struct ObjectFlags: u8 {
        /// Outline quads and skip back-face culling.
        const WIREFRAME = 1 << 0;
    }
}

/// Called with each emitted command's index after `transform`.
pub type IterateFn = fn(usize, &mut DrawCommand);

pub struct Object3d {
    pub model: PolygonData,
    /// Slot of the first object command in the frame's draw list.
    pub offset: usize,
    pub flags: ObjectFlags,
    pub iterate_fn: Option<IterateFn>,
    /// Commands emitted by the last `transform`.
    pub count: usize,
    commands: Vec<DrawCommand>,
    view: Vec<Fix16Vec3>,
    prepared: bool,
}

impl Object3d {
    pub fn new(model: PolygonData, offset: usize, flags: ObjectFlags) -> Self {
        Self {
            model,
            offset,
            flags,
            iterate_fn: None,
            count: 0,
            commands: Vec::new(),
            view: Vec::new(),
            prepared: false,
        }
    }

    pub fn with_iterate_fn(mut self, f: IterateFn) -> Self {
        self.iterate_fn = Some(f);
        self
    }

    /// Validate the model and size the per-frame buffers.
    pub fn prepare(&mut self) -> Result<(), ModelError> {
        self.model.validate()?;
        self.commands = Vec::with_capacity(self.model.quads.len());
        self.view = Vec::with_capacity(self.model.points.len());
        self.count = 0;
        self.prepared = true;
        Ok(())
    }

    pub fn polygon_count(&self) -> usize {
        self.model.quads.len()
    }

    /// Transform by the top of `stack`, cull, project, and emit one command
    /// per visible quad. Returns the number emitted.
    pub fn transform(&mut self, stack: &MatrixStack) -> Result<usize, ModelError> {
        if !self.prepared {
            return Err(ModelError::NotPrepared);
        }

        let matrix = stack.top();
        self.view.clear();
        self.view
            .extend(self.model.points.iter().map(|p| matrix.transform_point(p)));

        let wireframe = self.flags.contains(ObjectFlags::WIREFRAME);
        self.commands.clear();

        for (quad, attribute) in self.model.quads.iter().zip(&self.model.attributes) {
            let vertices = quad.vertices.map(|i| self.view[usize::from(i)]);
            if vertices.iter().any(|v| v.z <= NEAR_Z) {
                continue;
            }

            if !wireframe && !attribute.double_sided {
                let normal = matrix.transform_vector(&quad.normal);
                if normal.dot(&vertices[0]) >= Fix16::ZERO {
                    continue;
                }
            }

            let points = vertices.map(|v| project(&v));
            let command = if wireframe {
                DrawCommand::PolyLine {
                    points,
                    color: attribute.color,
                    mode: DrawMode::empty(),
                }
            } else {
                DrawCommand::Polygon {
                    points,
                    color: attribute.color,
                    mode: DrawMode::empty(),
                }
            };
            self.commands.push(command);
        }

        self.count = self.commands.len();
        Ok(self.count)
    }

    /// Run the iterate function over the emitted commands.
    pub fn iterate(&mut self) {
        if let Some(f) = self.iterate_fn {
            for (index, command) in self.commands.iter_mut().enumerate() {
                f(index, command);
            }
        }
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }
}

/// Perspective projection onto the screen plane. `v.z` must exceed `NEAR_Z`.
pub fn project(v: &Fix16Vec3) -> Int16Vec2 {
    let x = v.x * FOCAL_LENGTH / v.z;
    let y = v.y * FOCAL_LENGTH / v.z;
    Fix16Vec2::new(x, y).to_screen()
}
