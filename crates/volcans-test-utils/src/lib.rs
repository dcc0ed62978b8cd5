//! Shared fixtures for volcans tests: small synthetic catalogues, synthetic
//! analogy matrices and on-disk data directories.

use std::path::Path;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use volcans_common::{Criterion, SimilarityMatrix, VolcanoRecord};

/// Three volcanoes A, B, C.
pub fn abc_volcanoes() -> Vec<VolcanoRecord> {
    vec![
        VolcanoRecord::new("A", "Atlantis", 100001),
        VolcanoRecord::new("B", "Atlantis", 100002),
        VolcanoRecord::new("C", "Lemuria", 100003),
    ]
}

/// Single-criterion matrix matching [`abc_volcanoes`].
pub fn abc_matrix() -> SimilarityMatrix {
    SimilarityMatrix::from_rows(vec![
        vec![1.0, 0.8, 0.3],
        vec![0.8, 1.0, 0.1],
        vec![0.3, 0.1, 1.0],
    ])
    .expect("fixture matrix is square")
}

/// A ten-volcano catalogue with one duplicated name ("Cerro Azul").
pub fn sample_volcanoes() -> Vec<VolcanoRecord> {
    vec![
        VolcanoRecord::new("Etna", "Italy", 211060),
        VolcanoRecord::new("Vesuvius", "Italy", 211020),
        VolcanoRecord::new("Fuji", "Japan", 283030),
        VolcanoRecord::new("Ruiz, Nevado del", "Colombia", 351020),
        VolcanoRecord::new("St. Helens", "United States", 321050),
        VolcanoRecord::new("Cerro Azul", "Chile", 357020),
        VolcanoRecord::new("Cerro Azul", "Ecuador", 353010),
        VolcanoRecord::new("Taal", "Philippines", 273070),
        VolcanoRecord::new("Pinatubo", "Philippines", 273083),
        VolcanoRecord::new("Hekla", "Iceland", 372070),
    ]
}

/// [`sample_volcanoes`] plus two more, so a default request of ten analogues
/// fits with the target alongside.
pub fn extended_volcanoes() -> Vec<VolcanoRecord> {
    let mut volcanoes = sample_volcanoes();
    volcanoes.push(VolcanoRecord::new("Stromboli", "Italy", 211040));
    volcanoes.push(VolcanoRecord::new("Krakatau", "Indonesia", 262000));
    volcanoes
}

/// Symmetric matrix with unit diagonal and off-diagonal values drawn from [0, 1).
/// Deterministic for a given seed.
pub fn random_symmetric_matrix(dim: usize, seed: u64) -> SimilarityMatrix {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut rows = vec![vec![0.0; dim]; dim];
    for i in 0..dim {
        rows[i][i] = 1.0;
        for j in (i + 1)..dim {
            let v: f64 = rng.gen_range(0.0..0.999);
            rows[i][j] = v;
            rows[j][i] = v;
        }
    }
    SimilarityMatrix::from_rows(rows).expect("generated matrix is square")
}

/// Every cell set to `value`.
pub fn constant_matrix(dim: usize, value: f64) -> SimilarityMatrix {
    SimilarityMatrix::from_rows(vec![vec![value; dim]; dim]).expect("generated matrix is square")
}

/// Five random matrices, one per criterion, each from its own seed.
pub fn random_criterion_matrices(dim: usize, seed: u64) -> Vec<(Criterion, SimilarityMatrix)> {
    Criterion::ALL
        .iter()
        .enumerate()
        .map(|(i, c)| (*c, random_symmetric_matrix(dim, seed + i as u64)))
        .collect()
}

/// Write a data directory in the on-disk layout read by `volcans-data`.
pub fn write_data_dir(
    dir: &Path,
    volcanoes: &[VolcanoRecord],
    matrices: &[(Criterion, SimilarityMatrix)],
) -> anyhow::Result<()> {
    let mut names = csv::WriterBuilder::new()
        .has_headers(false)
        .from_path(dir.join("volc_names.csv"))?;
    for v in volcanoes {
        let id = v.smithsonian_id.to_string();
        names.write_record([v.name.as_str(), v.country.as_str(), id.as_str()])?;
    }
    names.flush()?;

    for (criterion, matrix) in matrices {
        let mut w = csv::WriterBuilder::new()
            .has_headers(false)
            .from_path(dir.join(format!("{}.csv", criterion.as_str())))?;
        for i in 0..matrix.dim() {
            w.write_record(matrix.row(i).iter().map(|v| v.to_string()))?;
        }
        w.flush()?;
    }
    Ok(())
}

/// Fresh temporary data directory holding `volcanoes` and five random matrices.
pub fn temp_data_dir(volcanoes: &[VolcanoRecord], seed: u64) -> anyhow::Result<tempfile::TempDir> {
    let dir = tempfile::tempdir()?;
    let matrices = random_criterion_matrices(volcanoes.len(), seed);
    write_data_dir(dir.path(), volcanoes, &matrices)?;
    Ok(dir)
}
