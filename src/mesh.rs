//! Mesh data: local-space vertices plus triangle faces indexing into them.

use std::io::BufRead;
use std::path::Path;

use crate::math::mat4::Mat4;
use crate::math::vec3::Vec3;

/// A triangle as three zero-based indices into a mesh's vertex list.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Face {
    pub a: usize,
    pub b: usize,
    pub c: usize,
}

impl Face {
    pub const fn new(a: usize, b: usize, c: usize) -> Self {
        Self { a, b, c }
    }

    pub fn indices(&self) -> [usize; 3] {
        [self.a, self.b, self.c]
    }

    /// The three edges in drawing order: A-B, B-C, C-A.
    pub fn edges(&self) -> [(usize, usize); 3] {
        [(self.a, self.b), (self.b, self.c), (self.c, self.a)]
    }
}

#[derive(Debug, thiserror::Error)]
pub enum MeshError {
    #[error("face {face} references vertex {index}, but the mesh has {vertex_count} vertices")]
    FaceIndexOutOfRange {
        face: usize,
        index: usize,
        vertex_count: usize,
    },
    #[error("{kind} slot {index} is out of range for a mesh with {count} {kind}s")]
    SlotOutOfRange {
        kind: &'static str,
        index: usize,
        count: usize,
    },
    #[error("failed to load OBJ: {0}")]
    Load(#[from] tobj::LoadError),
}

const CUBE_VERTICES: [Vec3; 8] = [
    Vec3::new(-1.0, 1.0, 1.0),
    Vec3::new(1.0, 1.0, 1.0),
    Vec3::new(-1.0, -1.0, 1.0),
    Vec3::new(1.0, -1.0, 1.0),
    Vec3::new(-1.0, 1.0, -1.0),
    Vec3::new(1.0, 1.0, -1.0),
    Vec3::new(1.0, -1.0, -1.0),
    Vec3::new(-1.0, -1.0, -1.0),
];

const CUBE_FACES: [Face; 12] = [
    Face::new(0, 1, 2),
    Face::new(1, 2, 3),
    Face::new(1, 3, 6),
    Face::new(1, 5, 6),
    Face::new(0, 1, 4),
    Face::new(1, 4, 5),
    Face::new(2, 3, 7),
    Face::new(3, 6, 7),
    Face::new(0, 2, 7),
    Face::new(0, 4, 7),
    Face::new(4, 5, 6),
    Face::new(4, 6, 7),
];

/// A named triangle mesh with its own position and Euler rotation.
///
/// The vertex and face counts are fixed at construction. Geometry can be
/// filled in slot by slot before the first render, and `position` /
/// `rotation` are meant to be mutated freely between frames.
#[derive(Debug, Clone, PartialEq)]
pub struct Mesh {
    name: String,
    pub position: Vec3,
    /// Euler angles in radians: x = pitch, y = yaw, z = roll.
    pub rotation: Vec3,
    vertices: Vec<Vec3>,
    faces: Vec<Face>,
}

impl Mesh {
    /// Builds a mesh, checking that every face index refers to a vertex.
    pub fn new(
        name: impl Into<String>,
        vertices: Vec<Vec3>,
        faces: Vec<Face>,
    ) -> Result<Self, MeshError> {
        for (face_index, face) in faces.iter().enumerate() {
            check_face(face_index, face, vertices.len())?;
        }

        Ok(Self {
            name: name.into(),
            position: Vec3::ZERO,
            rotation: Vec3::ZERO,
            vertices,
            faces,
        })
    }

    /// Builds a mesh with `vertex_count` zeroed vertices and `face_count`
    /// faces all pointing at vertex 0, to be filled in with
    /// [`Mesh::set_vertex`] and [`Mesh::set_face`].
    pub fn with_counts(
        name: impl Into<String>,
        vertex_count: usize,
        face_count: usize,
    ) -> Result<Self, MeshError> {
        Self::new(
            name,
            vec![Vec3::ZERO; vertex_count],
            vec![Face::default(); face_count],
        )
    }

    /// The 8-vertex, 12-triangle cube spanning -1..1 on every axis.
    pub fn cube(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            position: Vec3::ZERO,
            rotation: Vec3::ZERO,
            vertices: CUBE_VERTICES.to_vec(),
            faces: CUBE_FACES.to_vec(),
        }
    }

    /// Loads every object in an OBJ file as a separate, triangulated mesh.
    pub fn load_all_from_obj(path: impl AsRef<Path>) -> Result<Vec<Self>, MeshError> {
        let path = path.as_ref();
        let (models, _materials) = tobj::load_obj(path, &obj_load_options())?;
        let meshes = meshes_from_models(models)?;
        tracing::debug!(path = %path.display(), count = meshes.len(), "loaded OBJ meshes");
        Ok(meshes)
    }

    /// Like [`Mesh::load_all_from_obj`], reading OBJ text from `reader`.
    /// Material libraries are ignored.
    pub fn load_all_from_obj_reader(reader: &mut impl BufRead) -> Result<Vec<Self>, MeshError> {
        let (models, _materials) = tobj::load_obj_buf(reader, &obj_load_options(), |_| {
            Err(tobj::LoadError::OpenFileFailed)
        })?;
        meshes_from_models(models)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn vertices(&self) -> &[Vec3] {
        &self.vertices
    }

    pub fn faces(&self) -> &[Face] {
        &self.faces
    }

    pub fn set_vertex(&mut self, index: usize, vertex: Vec3) -> Result<(), MeshError> {
        let count = self.vertices.len();
        let slot = self.vertices.get_mut(index).ok_or(MeshError::SlotOutOfRange {
            kind: "vertex",
            index,
            count,
        })?;
        *slot = vertex;
        Ok(())
    }

    pub fn set_face(&mut self, index: usize, face: Face) -> Result<(), MeshError> {
        check_face(index, &face, self.vertices.len())?;
        let count = self.faces.len();
        let slot = self.faces.get_mut(index).ok_or(MeshError::SlotOutOfRange {
            kind: "face",
            index,
            count,
        })?;
        *slot = face;
        Ok(())
    }

    /// Local-to-world matrix: rotation (yaw, pitch, roll from y, x, z) first,
    /// then translation.
    pub fn world_matrix(&self) -> Mat4 {
        Mat4::rotation_yaw_pitch_roll(self.rotation.y, self.rotation.x, self.rotation.z)
            * Mat4::translation(self.position.x, self.position.y, self.position.z)
    }
}

fn check_face(face_index: usize, face: &Face, vertex_count: usize) -> Result<(), MeshError> {
    match face.indices().into_iter().find(|&i| i >= vertex_count) {
        Some(index) => Err(MeshError::FaceIndexOutOfRange {
            face: face_index,
            index,
            vertex_count,
        }),
        None => Ok(()),
    }
}

fn obj_load_options() -> tobj::LoadOptions {
    tobj::LoadOptions {
        triangulate: true,
        single_index: true,
        ..Default::default()
    }
}

fn meshes_from_models(models: Vec<tobj::Model>) -> Result<Vec<Mesh>, MeshError> {
    models
        .into_iter()
        .map(|model| {
            let vertices = model
                .mesh
                .positions
                .chunks_exact(3)
                .map(|p| Vec3::new(p[0], p[1], p[2]))
                .collect();
            let faces = model
                .mesh
                .indices
                .chunks_exact(3)
                .map(|i| Face::new(i[0] as usize, i[1] as usize, i[2] as usize))
                .collect();
            Mesh::new(model.name, vertices, faces)
        })
        .collect()
}
