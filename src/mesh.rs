//! Triangle meshes.
//!
//! A [`Mesh`] owns an ordered list of [`Triangle`]s, each owning its three
//! [`Vertex`]es. Positions and normals are in world space; the renderer reads
//! meshes but never mutates them.

use std::path::Path;

use crate::error::Result;
use crate::math::vec2::Vec2;
use crate::math::vec3::Vec3;

/// A mesh vertex with position, normal and texture coordinate.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Vertex {
    pub position: Vec3,
    pub normal: Vec3,
    pub tex_coord: Vec2,
}

impl Vertex {
    pub const fn new(position: Vec3, normal: Vec3, tex_coord: Vec2) -> Self {
        Self {
            position,
            normal,
            tex_coord,
        }
    }
}

/// A triangle that owns its three vertices.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Triangle {
    pub vertices: [Vertex; 3],
}

impl Triangle {
    pub const fn new(v0: Vertex, v1: Vertex, v2: Vertex) -> Self {
        Self {
            vertices: [v0, v1, v2],
        }
    }

    /// Builds a triangle from positions only, using the face normal for all
    /// three vertices and zero texture coordinates.
    pub fn from_positions(p0: Vec3, p1: Vec3, p2: Vec3) -> Self {
        let normal = face_normal(p0, p1, p2);
        Self::new(
            Vertex::new(p0, normal, Vec2::ZERO),
            Vertex::new(p1, normal, Vec2::ZERO),
            Vertex::new(p2, normal, Vec2::ZERO),
        )
    }

    /// Unit normal of the plane through the three positions, following the
    /// right-hand rule (counter-clockwise winding faces the viewer).
    pub fn face_normal(&self) -> Vec3 {
        let [a, b, c] = self.vertices;
        face_normal(a.position, b.position, c.position)
    }
}

fn face_normal(a: Vec3, b: Vec3, c: Vec3) -> Vec3 {
    let n = (b - a).cross(c - a);
    if n.magnitude() > f32::EPSILON {
        n.normalize()
    } else {
        Vec3::ZERO
    }
}

/// A named, ordered collection of triangles.
#[derive(Clone, Debug, Default)]
pub struct Mesh {
    name: String,
    triangles: Vec<Triangle>,
}

impl Mesh {
    pub fn new(name: impl Into<String>, triangles: Vec<Triangle>) -> Self {
        Self {
            name: name.into(),
            triangles,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn triangles(&self) -> &[Triangle] {
        &self.triangles
    }

    pub fn triangle_count(&self) -> usize {
        self.triangles.len()
    }

    pub fn push(&mut self, triangle: Triangle) {
        self.triangles.push(triangle);
    }

    /// Load every object/group of an OBJ file as a separate mesh.
    ///
    /// Faces are triangulated. Missing normals fall back to the face normal,
    /// missing texture coordinates to (0, 0).
    pub fn load_all_from_obj<P: AsRef<Path>>(path: P) -> Result<Vec<Mesh>> {
        let options = tobj::LoadOptions {
            triangulate: true,
            single_index: true,
            ..Default::default()
        };
        let (models, _materials) = tobj::load_obj(path.as_ref(), &options)?;

        let meshes: Vec<Mesh> = models
            .into_iter()
            .map(|model| Mesh::from_tobj(model.name, &model.mesh))
            .filter(|mesh| {
                if mesh.triangles.is_empty() {
                    log::warn!("Skipping OBJ group '{}' without faces", mesh.name);
                    false
                } else {
                    true
                }
            })
            .collect();

        log::info!(
            "Loaded {} mesh(es) from '{}'",
            meshes.len(),
            path.as_ref().display()
        );
        Ok(meshes)
    }

    fn from_tobj(name: String, mesh: &tobj::Mesh) -> Self {
        let position = |i: usize| {
            Vec3::new(
                mesh.positions[3 * i],
                mesh.positions[3 * i + 1],
                mesh.positions[3 * i + 2],
            )
        };
        let normal = |i: usize| {
            (mesh.normals.len() >= 3 * (i + 1)).then(|| {
                Vec3::new(
                    mesh.normals[3 * i],
                    mesh.normals[3 * i + 1],
                    mesh.normals[3 * i + 2],
                )
            })
        };
        let tex_coord = |i: usize| {
            if mesh.texcoords.len() >= 2 * (i + 1) {
                Vec2::new(mesh.texcoords[2 * i], mesh.texcoords[2 * i + 1])
            } else {
                Vec2::ZERO
            }
        };

        let triangles = mesh
            .indices
            .chunks_exact(3)
            .map(|face| {
                let idx = [face[0] as usize, face[1] as usize, face[2] as usize];
                let positions = idx.map(|i| position(i));
                let fallback = face_normal(positions[0], positions[1], positions[2]);
                let vertex = |k: usize| {
                    Vertex::new(
                        positions[k],
                        normal(idx[k]).unwrap_or(fallback),
                        tex_coord(idx[k]),
                    )
                };
                Triangle::new(vertex(0), vertex(1), vertex(2))
            })
            .collect();

        Self::new(name, triangles)
    }

    /// A 2x2x2 cube centred on the origin, counter-clockwise faces pointing
    /// outward, with per-face normals and a full [0,1] texture on each face.
    pub fn cube() -> Self {
        let mut mesh = Self::new("cube", Vec::with_capacity(CUBE_FACES.len() * 2));
        for (normal, corners) in CUBE_FACES {
            let uv = [
                Vec2::new(0.0, 0.0),
                Vec2::new(1.0, 0.0),
                Vec2::new(1.0, 1.0),
                Vec2::new(0.0, 1.0),
            ];
            let v = |k: usize| Vertex::new(corners[k], normal, uv[k]);
            mesh.push(Triangle::new(v(0), v(1), v(2)));
            mesh.push(Triangle::new(v(0), v(2), v(3)));
        }
        mesh
    }
}

// Each face: outward normal, then corners counter-clockwise seen from outside,
// starting bottom-left of the face's texture.
const CUBE_FACES: [(Vec3, [Vec3; 4]); 6] = [
    // Front (+Z)
    (
        Vec3::new(0.0, 0.0, 1.0),
        [
            Vec3::new(-1.0, -1.0, 1.0),
            Vec3::new(1.0, -1.0, 1.0),
            Vec3::new(1.0, 1.0, 1.0),
            Vec3::new(-1.0, 1.0, 1.0),
        ],
    ),
    // Back (-Z)
    (
        Vec3::new(0.0, 0.0, -1.0),
        [
            Vec3::new(1.0, -1.0, -1.0),
            Vec3::new(-1.0, -1.0, -1.0),
            Vec3::new(-1.0, 1.0, -1.0),
            Vec3::new(1.0, 1.0, -1.0),
        ],
    ),
    // Right (+X)
    (
        Vec3::new(1.0, 0.0, 0.0),
        [
            Vec3::new(1.0, -1.0, 1.0),
            Vec3::new(1.0, -1.0, -1.0),
            Vec3::new(1.0, 1.0, -1.0),
            Vec3::new(1.0, 1.0, 1.0),
        ],
    ),
    // Left (-X)
    (
        Vec3::new(-1.0, 0.0, 0.0),
        [
            Vec3::new(-1.0, -1.0, -1.0),
            Vec3::new(-1.0, -1.0, 1.0),
            Vec3::new(-1.0, 1.0, 1.0),
            Vec3::new(-1.0, 1.0, -1.0),
        ],
    ),
    // Top (+Y)
    (
        Vec3::new(0.0, 1.0, 0.0),
        [
            Vec3::new(-1.0, 1.0, 1.0),
            Vec3::new(1.0, 1.0, 1.0),
            Vec3::new(1.0, 1.0, -1.0),
            Vec3::new(-1.0, 1.0, -1.0),
        ],
    ),
    // Bottom (-Y)
    (
        Vec3::new(0.0, -1.0, 0.0),
        [
            Vec3::new(-1.0, -1.0, -1.0),
            Vec3::new(1.0, -1.0, -1.0),
            Vec3::new(1.0, -1.0, 1.0),
            Vec3::new(-1.0, -1.0, 1.0),
        ],
    ),
];

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::io::Write;

    #[test]
    fn cube_faces_wind_outward() {
        let cube = Mesh::cube();
        assert_eq!(cube.triangle_count(), 12);
        for triangle in cube.triangles() {
            let geometric = triangle.face_normal();
            let declared = triangle.vertices[0].normal;
            assert_relative_eq!(geometric.dot(declared), 1.0, epsilon = 1e-6);
        }
    }

    #[test]
    fn from_positions_uses_face_normal() {
        let t = Triangle::from_positions(
            Vec3::new(-1.0, -1.0, 0.0),
            Vec3::new(1.0, -1.0, 0.0),
            Vec3::new(0.0, 1.0, 0.0),
        );
        assert_eq!(t.vertices[2].normal, Vec3::new(0.0, 0.0, 1.0));
    }

    #[test]
    fn degenerate_face_normal_is_zero() {
        let t = Triangle::from_positions(Vec3::ZERO, Vec3::ONE, Vec3::ONE * 2.0);
        assert_eq!(t.face_normal(), Vec3::ZERO);
    }

    #[test]
    fn loads_obj_quad_as_two_triangles() {
        let path = std::env::temp_dir().join(format!("pinhole-quad-{}.obj", std::process::id()));
        {
            let mut file = std::fs::File::create(&path).unwrap();
            writeln!(file, "o quad").unwrap();
            writeln!(file, "v -1 -1 0\nv 1 -1 0\nv 1 1 0\nv -1 1 0").unwrap();
            writeln!(file, "vt 0 0\nvt 1 0\nvt 1 1\nvt 0 1").unwrap();
            writeln!(file, "f 1/1 2/2 3/3 4/4").unwrap();
        }

        let meshes = Mesh::load_all_from_obj(&path).unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(meshes.len(), 1);
        let quad = &meshes[0];
        assert_eq!(quad.name(), "quad");
        assert_eq!(quad.triangle_count(), 2);
        for triangle in quad.triangles() {
            for vertex in triangle.vertices {
                // No normals in the file: the face normal is used.
                assert_eq!(vertex.normal, Vec3::new(0.0, 0.0, 1.0));
            }
        }
        assert_eq!(quad.triangles()[0].vertices[1].tex_coord, Vec2::new(1.0, 0.0));
    }

    #[test]
    fn missing_obj_file_is_an_error() {
        assert!(Mesh::load_all_from_obj("/nonexistent/pinhole.obj").is_err());
    }
}
