use crate::cli::{MatrixArgs, MatrixKind};
use crate::error::Result;
use nalgebra::Matrix3;
use tomoalign::core::transform::matrix::{
    generate_rotation_matrix, matrix_3d_to_4x4, matrix_magnify_3d, matrix_rotate_3d_x,
    matrix_rotate_3d_y, matrix_rotate_3d_z,
};
use tracing::debug;

pub fn build(kind: MatrixKind) -> Matrix3<f64> {
    match kind {
        MatrixKind::Euler { phi, the, psi } => generate_rotation_matrix(phi, the, psi),
        MatrixKind::RotateX { degrees } => matrix_rotate_3d_x(degrees),
        MatrixKind::RotateY { degrees } => matrix_rotate_3d_y(degrees),
        MatrixKind::RotateZ { degrees } => matrix_rotate_3d_z(degrees),
        MatrixKind::Magnify { factor } => matrix_magnify_3d(factor),
    }
}

pub fn render(args: &MatrixArgs) -> String {
    let matrix = build(args.kind);
    if args.homogeneous {
        format!("{:.*}", args.precision, matrix_3d_to_4x4(&matrix))
    } else {
        format!("{:.*}", args.precision, matrix)
    }
}

pub async fn run(args: MatrixArgs) -> Result<()> {
    debug!("Building {:?} matrix.", args.kind);
    print!("{}", render(&args));
    Ok(())
}
