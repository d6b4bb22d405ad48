use std::fmt;

use blue_core::draw::DrawListError;
use blue_core::matrix::MatrixStackError;
use blue_engine::components::RigidBodyError;
use blue_engine::SceneError;

use crate::assets::AssetError;
use crate::sega3d::model::ModelError;

/// Anything that can stop a demo frame.
#[derive(Debug)]
pub enum DemoError {
    Asset(AssetError),
    Model(ModelError),
    Matrix(MatrixStackError),
    Draw(DrawListError),
    Scene(SceneError),
    RigidBody(RigidBodyError),
}

impl fmt::Display for DemoError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DemoError::Asset(err) => write!(f, "asset error: {err}"),
            DemoError::Model(err) => write!(f, "model error: {err}"),
            DemoError::Matrix(err) => write!(f, "matrix error: {err}"),
            DemoError::Draw(err) => write!(f, "draw error: {err}"),
            DemoError::Scene(err) => write!(f, "scene error: {err}"),
            DemoError::RigidBody(err) => write!(f, "rigid body error: {err}"),
        }
    }
}

impl std::error::Error for DemoError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            DemoError::Asset(err) => Some(err),
            DemoError::Model(err) => Some(err),
            DemoError::Matrix(err) => Some(err),
            DemoError::Draw(err) => Some(err),
            DemoError::Scene(err) => Some(err),
            DemoError::RigidBody(err) => Some(err),
        }
    }
}

macro_rules! impl_from {
    ($($source:ty => $variant:ident),* $(,)?) => {
        $(
            impl From<$source> for DemoError {
                fn from(err: $source) -> Self {
                    DemoError::$variant(err)
                }
            }
        )*
    };
}

impl_from! {
    AssetError => Asset,
    ModelError => Model,
    MatrixStackError => Matrix,
    DrawListError => Draw,
    SceneError => Scene,
    RigidBodyError => RigidBody,
}
