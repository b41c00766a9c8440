//! Reading of whitespace-separated numeric tables from text files.
//!
//! Blank lines and anything following a `#` are ignored.

use std::{ fs, path::Path };
use ndarray as nd;
use log::debug;
use crate::error::LoadError;

pub type LoadResult<T> = Result<T, LoadError>;

/// Indices of the columns holding the radial mesh and the function values.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Columns {
    /// Column of the radial mesh.
    pub mesh: usize,
    /// Column of the function values.
    pub values: usize,
}

impl Default for Columns {
    fn default() -> Self { Self { mesh: 0, values: 1 } }
}

impl From<(usize, usize)> for Columns {
    fn from(cols: (usize, usize)) -> Self { Self { mesh: cols.0, values: cols.1 } }
}

/// Parse two columns out of a text table.
pub fn parse_columns(text: &str, cols: Columns, source: &Path)
    -> LoadResult<(nd::Array1<f64>, nd::Array1<f64>)>
{
    let mut mesh: Vec<f64> = Vec::new();
    let mut values: Vec<f64> = Vec::new();
    for (k, line) in text.lines().enumerate() {
        let data = line.split('#').next().unwrap_or("").trim();
        if data.is_empty() { continue; }
        let fields: Vec<&str> = data.split_whitespace().collect();
        let get = |c: usize| -> LoadResult<f64> {
            let field
                = fields.get(c)
                .ok_or_else(|| LoadError::MissingColumn(source.to_path_buf(), k + 1, c))?;
            field.parse::<f64>()
                .map_err(|_| LoadError::Parse(source.to_path_buf(), k + 1, field.to_string()))
        };
        mesh.push(get(cols.mesh)?);
        values.push(get(cols.values)?);
    }
    Ok((nd::Array1::from(mesh), nd::Array1::from(values)))
}

/// Read two columns out of a text file.
pub fn load_columns<P>(path: P, cols: Columns)
    -> LoadResult<(nd::Array1<f64>, nd::Array1<f64>)>
where P: AsRef<Path>
{
    let path = path.as_ref();
    let text = fs::read_to_string(path)
        .map_err(|e| LoadError::Io(path.to_path_buf(), e))?;
    let (mesh, values) = parse_columns(&text, cols, path)?;
    debug!("loadtxt::load_columns: read {} rows from {}", mesh.len(), path.display());
    Ok((mesh, values))
}

#[cfg(test)]
mod tests {
    use super::*;

    const TABLE: &str = "\
# r   f   g
0.0  1.0  5.0
0.5  2.0  6.0   # trailing comment

1.0  3.0  7.0
";

    #[test]
    fn picks_columns() {
        let src = Path::new("table.dat");
        let (r, f) = parse_columns(TABLE, Columns::default(), src).unwrap();
        assert_eq!(r, nd::array![0.0, 0.5, 1.0]);
        assert_eq!(f, nd::array![1.0, 2.0, 3.0]);
        let (r, g) = parse_columns(TABLE, (0, 2).into(), src).unwrap();
        assert_eq!(r, nd::array![0.0, 0.5, 1.0]);
        assert_eq!(g, nd::array![5.0, 6.0, 7.0]);
    }

    #[test]
    fn malformed() {
        let src = Path::new("table.dat");
        assert!(matches!(
            parse_columns(TABLE, (0, 3).into(), src),
            Err(LoadError::MissingColumn(_, 2, 3)),
        ));
        assert!(matches!(
            parse_columns("0.0 abc\n", Columns::default(), src),
            Err(LoadError::Parse(_, 1, _)),
        ));
        assert!(matches!(
            load_columns("/nonexistent/radatom/table.dat", Columns::default()),
            Err(LoadError::Io(..)),
        ));
    }
}
