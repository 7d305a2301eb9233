use std::fs::File;
use std::io::{BufRead, BufWriter, Write};
use std::path::{Path, PathBuf};

use fxhash::FxHashMap;

use crate::errors::{ModelError, Result};
use crate::models::variant::{VariantKey, display_optional};
use crate::utils::{TableHeader, get_dynamic_reader, is_missing};

pub const SCORE_COLUMNS: [&str; 5] = ["CHROM", "POS", "REF", "ALT", "PriorityScore"];

///
/// Final score for one variant. `None` means the variant could not be scored.
///
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoredVariant {
    pub key: VariantKey,
    pub priority_score: Option<i32>,
}

///
/// ScoreTable struct, the (identity, score) table handed to the VCF writer.
///
#[derive(Clone, Debug, Default)]
pub struct ScoreTable {
    pub rows: Vec<ScoredVariant>,
    pub path: Option<PathBuf>,
}

impl TryFrom<&Path> for ScoreTable {
    type Error = ModelError;

    ///
    /// Read a [ScoreTable] from a tab-delimited file with a header row.
    ///
    /// The header must name `CHROM`, `POS`, `REF`, `ALT` and `PriorityScore`;
    /// other columns are ignored. Scores may be written as integers or as
    /// integral floats (`3.0`); missing markers give an unscored row.
    fn try_from(value: &Path) -> Result<Self> {
        let reader = get_dynamic_reader(value)
            .map_err(|e| ModelError::FileReadError(format!("{:#}", e)))?;
        let mut lines = reader.lines();

        let header = match lines.next() {
            Some(line) => TableHeader::parse("scores", &line?),
            None => {
                return Err(ModelError::MissingColumns {
                    table: "scores".to_string(),
                    columns: SCORE_COLUMNS.iter().map(|c| c.to_string()).collect(),
                });
            }
        };
        header.require(&SCORE_COLUMNS)?;

        let mut rows = Vec::new();
        for (index, line) in lines.enumerate() {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }
            let fields = header.split_row(index + 2, &line)?;

            let pos_raw = header.get(&fields, "POS");
            let pos = pos_raw
                .trim()
                .parse::<u64>()
                .map_err(|_| ModelError::InvalidValue {
                    field: "POS".to_string(),
                    value: pos_raw.to_string(),
                })?;

            let key = VariantKey::new(
                header.get(&fields, "CHROM"),
                pos,
                header.get(&fields, "REF"),
                header.get(&fields, "ALT"),
            );
            let priority_score = parse_score(header.get(&fields, "PriorityScore"))?;

            rows.push(ScoredVariant {
                key,
                priority_score,
            });
        }

        Ok(ScoreTable {
            rows,
            path: Some(value.to_path_buf()),
        })
    }
}

impl TryFrom<&str> for ScoreTable {
    type Error = ModelError;

    fn try_from(value: &str) -> Result<Self> {
        ScoreTable::try_from(Path::new(value))
    }
}

impl From<Vec<ScoredVariant>> for ScoreTable {
    fn from(rows: Vec<ScoredVariant>) -> Self {
        ScoreTable { rows, path: None }
    }
}

impl FromIterator<ScoredVariant> for ScoreTable {
    fn from_iter<I: IntoIterator<Item = ScoredVariant>>(iter: I) -> Self {
        ScoreTable::from(iter.into_iter().collect::<Vec<_>>())
    }
}

impl<'a> IntoIterator for &'a ScoreTable {
    type Item = &'a ScoredVariant;
    type IntoIter = std::slice::Iter<'a, ScoredVariant>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.iter()
    }
}

impl ScoreTable {
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    ///
    /// Build the identity -> score lookup used when rewriting a VCF.
    ///
    /// Unscored rows are left out. When two rows share a key the later
    /// one wins.
    ///
    pub fn to_lookup(&self) -> FxHashMap<VariantKey, i32> {
        self.rows
            .iter()
            .filter_map(|row| row.priority_score.map(|s| (row.key.clone(), s)))
            .collect()
    }

    ///
    /// Save the table as a tab-delimited file.
    ///
    /// # Arguments
    /// - path: the path to the file to dump to
    pub fn to_tsv<T: AsRef<Path>>(&self, path: T) -> std::io::Result<()> {
        let mut writer = BufWriter::new(File::create(path.as_ref())?);

        writeln!(writer, "{}", SCORE_COLUMNS.join("\t"))?;
        for row in &self.rows {
            writeln!(
                writer,
                "{}\t{}\t{}\t{}\t{}",
                row.key.chrom,
                row.key.pos,
                row.key.ref_allele,
                row.key.alt_allele,
                display_optional(&row.priority_score)
            )?;
        }
        writer.flush()
    }
}

fn parse_score(value: &str) -> Result<Option<i32>> {
    if is_missing(value) {
        return Ok(None);
    }
    let invalid = || ModelError::InvalidValue {
        field: "PriorityScore".to_string(),
        value: value.to_string(),
    };

    let value = value.trim();
    if let Ok(score) = value.parse::<i32>() {
        return Ok(Some(score));
    }
    let score = value.parse::<f64>().map_err(|_| invalid())?;
    if score.fract() != 0.0 || !score.is_finite() {
        return Err(invalid());
    }
    Ok(Some(score as i32))
}
