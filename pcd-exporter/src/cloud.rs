use std::{
    fs::{self, File},
    io::{self, BufWriter, Write},
    path::Path,
};

use pcd_core::{pointcloud::point::PointCloud, ReconstructionError};

/// `Cloud_<id>.txt`
pub fn cloud_file_name(file_id: &str) -> String {
    format!("Cloud_{}.txt", file_id)
}

/// Writes one `x y z` row per point, in meters with 4 decimals.
pub fn write_cloud<W: Write>(writer: &mut W, cloud: &PointCloud) -> io::Result<()> {
    for point in &cloud.points {
        let [x, y, z] = point.to_array();
        writeln!(writer, "{:.4} {:.4} {:.4}", x, y, z)?;
    }
    Ok(())
}

pub fn export_cloud(path: &Path, cloud: &PointCloud) -> Result<(), ReconstructionError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    let mut writer = BufWriter::new(File::create(path)?);
    write_cloud(&mut writer, cloud)?;
    writer.flush()?;

    log::debug!("wrote {} points to {:?}", cloud.len(), path);
    Ok(())
}
