//! Integration tests: annotated VCF -> flat variant rows

use std::io::Write;
use std::path::{Path, PathBuf};

use flate2::Compression;
use flate2::write::GzEncoder;
use pretty_assertions::assert_eq;
use rstest::{fixture, rstest};
use tempfile::{TempDir, tempdir};

use psscore_core::models::{LofTier, Strand};
use psscore_vcf::{VcfError, extract_variant_records, write_variant_records};

const CSQ_HEADER: &str = "##INFO=<ID=CSQ,Number=.,Type=String,Description=\"Consequence annotations from Ensembl VEP. Format: Allele|Consequence|SYMBOL|SYMBOL_SOURCE|HGNC_ID|Feature|HGVSc|EXON|INTRON|STRAND|LoF\">";
const SPLICEAI_HEADER: &str = "##INFO=<ID=SpliceAI,Number=.,Type=String,Description=\"SpliceAIv1.3.1 variant annotation. Format: ALLELE|SYMBOL|DS_AG|DS_AL|DS_DG|DS_DL|DP_AG|DP_AL|DP_DG|DP_DL\">";
const COLUMNS: &str = "#CHROM\tPOS\tID\tREF\tALT\tQUAL\tFILTER\tINFO";

const DONOR_RECORD: &str = "17\t41243451\t.\tA\tG\t.\tPASS\tCSQ=G|splice_donor_variant&intron_variant|BRCA1|HGNC|HGNC:1100|ENST00000357654|ENST00000357654.9:c.5074+2T>C||17/22|-1|HC;SpliceAI=G|BRCA1|0.00|0.00|0.01|0.91|-2|10|-2|1";

fn write_vcf(dir: &Path, name: &str, header: &[&str], records: &[&str]) -> PathBuf {
    let path = dir.join(name);
    let mut f = std::fs::File::create(&path).unwrap();
    writeln!(f, "##fileformat=VCFv4.2").unwrap();
    for line in header {
        writeln!(f, "{}", line).unwrap();
    }
    writeln!(f, "{}", COLUMNS).unwrap();
    for line in records {
        writeln!(f, "{}", line).unwrap();
    }
    path
}

#[fixture]
fn dir() -> TempDir {
    tempdir().unwrap()
}

#[rstest]
fn test_extracts_typed_row(dir: TempDir) {
    let vcf = write_vcf(
        dir.path(),
        "in.vcf",
        &[CSQ_HEADER, SPLICEAI_HEADER],
        &[DONOR_RECORD],
    );

    let records = extract_variant_records(&vcf).unwrap();
    assert_eq!(records.len(), 1);

    let r = &records[0];
    assert_eq!(r.key.to_string(), "17-41243451-A-G");
    assert_eq!(r.symbol, "BRCA1");
    assert_eq!(r.symbol_source, "HGNC");
    assert_eq!(r.hgnc_number(), "1100");
    assert_eq!(r.transcript_id, "ENST00000357654");
    assert_eq!(r.hgvsc, "c.5074+2T>C");
    assert_eq!(r.consequences().collect::<Vec<_>>(), vec!["splice_donor_variant", "intron_variant"]);
    assert_eq!(r.exon, "");
    assert_eq!(r.intron, "17/22");
    assert_eq!(r.strand, Strand::Reverse);
    assert_eq!(r.delta_scores.donor_loss, Some(0.91));
    assert_eq!(r.delta_positions.acceptor_loss, Some(10));
    assert_eq!(r.max_delta, Some(0.91));
    assert_eq!(r.lof, LofTier::HighConfidence);
}

#[rstest]
fn test_layout_order_is_read_from_header(dir: TempDir) {
    // same content, SpliceAI fields declared in a different order
    let reordered = "##INFO=<ID=SpliceAI,Number=.,Type=String,Description=\"SpliceAI. Format: ALLELE|SYMBOL|DP_AG|DP_AL|DP_DG|DP_DL|DS_AG|DS_AL|DS_DG|DS_DL\">";
    let record = "1\t500\t.\tC\tT\t.\tPASS\tCSQ=T|missense_variant|GENE1|HGNC|5|ENST1|ENST1.2:c.10C>T|2/5||1|;SpliceAI=T|GENE1|-2|10|-2|1|0.30|0.00|0.05|0.00";
    let vcf = write_vcf(dir.path(), "in.vcf", &[CSQ_HEADER, reordered], &[record]);

    let records = extract_variant_records(&vcf).unwrap();
    assert_eq!(records[0].delta_scores.acceptor_gain, Some(0.30));
    assert_eq!(records[0].delta_positions.acceptor_gain, Some(-2));
    assert_eq!(records[0].max_delta, Some(0.30));
    assert_eq!(records[0].strand, Strand::Forward);
    assert_eq!(records[0].lof, LofTier::Unavailable);
}

#[rstest]
fn test_unavailable_predictions_and_skips(dir: TempDir) {
    let no_ag_position = "1\t600\t.\tG\tA\t.\tPASS\tCSQ=A|intron_variant|GENE1|HGNC|5|ENST1|||3/4|1|;SpliceAI=A|GENE1|0.10|0.20|0.00|0.00|.|3|4|5";
    let no_spliceai = "1\t700\t.\tG\tC\t.\tPASS\tCSQ=C|intron_variant|GENE1|HGNC|5|ENST1|||3/4|1|";
    let no_csq = "1\t800\t.\tG\tT\t.\tPASS\tSpliceAI=T|GENE1|0.10|0.20|0.00|0.00|1|3|4|5";
    let vcf = write_vcf(
        dir.path(),
        "in.vcf",
        &[CSQ_HEADER, SPLICEAI_HEADER],
        &[no_ag_position, no_spliceai, no_csq],
    );

    let records = extract_variant_records(&vcf).unwrap();
    assert_eq!(records.len(), 2);

    assert_eq!(records[0].delta_scores.acceptor_loss, Some(0.20));
    assert_eq!(records[0].max_delta, None);
    assert_eq!(records[0].hgvsc, "NA");

    assert_eq!(records[1].delta_scores.acceptor_gain, None);
    assert_eq!(records[1].max_delta, None);
}

#[rstest]
fn test_identical_rows_are_deduplicated(dir: TempDir) {
    let vcf = write_vcf(
        dir.path(),
        "in.vcf",
        &[CSQ_HEADER, SPLICEAI_HEADER],
        &[DONOR_RECORD, DONOR_RECORD],
    );
    assert_eq!(extract_variant_records(&vcf).unwrap().len(), 1);
}

#[rstest]
#[case(&[SPLICEAI_HEADER], "CSQ")]
#[case(&[CSQ_HEADER], "SpliceAI")]
fn test_missing_annotation_header_is_fatal(
    dir: TempDir,
    #[case] header: &[&str],
    #[case] missing: &str,
) {
    let vcf = write_vcf(dir.path(), "in.vcf", header, &[DONOR_RECORD]);

    match extract_variant_records(&vcf) {
        Err(VcfError::MissingAnnotationHeader(id)) => assert_eq!(id, missing),
        other => panic!("expected missing header error, got {:?}", other),
    }
}

#[rstest]
fn test_reads_gzipped_input(dir: TempDir) {
    let path = dir.path().join("in.vcf.gz");
    let file = std::fs::File::create(&path).unwrap();
    let mut gz = GzEncoder::new(file, Compression::default());
    write!(
        gz,
        "##fileformat=VCFv4.2\n{}\n{}\n{}\n{}\n",
        CSQ_HEADER, SPLICEAI_HEADER, COLUMNS, DONOR_RECORD
    )
    .unwrap();
    gz.finish().unwrap();

    let records = extract_variant_records(&path).unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].symbol, "BRCA1");
}

#[rstest]
fn test_write_variant_records(dir: TempDir) {
    let vcf = write_vcf(
        dir.path(),
        "in.vcf",
        &[CSQ_HEADER, SPLICEAI_HEADER],
        &[DONOR_RECORD],
    );
    let records = extract_variant_records(&vcf).unwrap();

    let out = dir.path().join("rows.tsv");
    write_variant_records(&out, &records).unwrap();

    let text = std::fs::read_to_string(&out).unwrap();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines.len(), 2);
    assert!(lines[0].starts_with("CHROM\tPOS\tREF\tALT\tGeneSymbol"));
    assert!(lines[1].starts_with("17\t41243451\tA\tG\tBRCA1\tHGNC\tHGNC:1100"));
    assert!(lines[1].ends_with("\t0.91\tHC"));
}
