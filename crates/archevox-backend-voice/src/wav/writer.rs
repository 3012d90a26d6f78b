//! Mono 16-bit WAV serialization.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

const HEADER_LEN: usize = 44;
const BYTES_PER_SAMPLE: u16 = 2;

/// Writes `pcm` (little-endian 16-bit mono) as a WAV stream.
pub fn write_wav<W: Write>(writer: &mut W, sample_rate: u32, pcm: &[u8]) -> io::Result<()> {
    writer.write_all(&header(sample_rate, pcm.len() as u32))?;
    writer.write_all(pcm)
}

/// Serializes a WAV file into memory.
pub fn write_wav_to_vec(sample_rate: u32, pcm: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(HEADER_LEN + pcm.len());
    out.extend_from_slice(&header(sample_rate, pcm.len() as u32));
    out.extend_from_slice(pcm);
    out
}

/// Writes samples to `path` as a 16-bit mono WAV.
pub fn write_wav_file(path: &Path, samples: &[f32], sample_rate: u32) -> io::Result<()> {
    let mut file = BufWriter::new(File::create(path)?);
    write_wav(&mut file, sample_rate, &samples_to_pcm16(samples))?;
    file.flush()
}

/// Quantizes to 16-bit little-endian PCM. Out-of-range samples clip to
/// +-32767 so the encoding stays symmetric.
pub fn samples_to_pcm16(samples: &[f32]) -> Vec<u8> {
    samples
        .iter()
        .flat_map(|&s| {
            let q = ((s as f64).clamp(-1.0, 1.0) * i16::MAX as f64).round() as i16;
            q.to_le_bytes()
        })
        .collect()
}

fn header(sample_rate: u32, data_len: u32) -> [u8; HEADER_LEN] {
    let fields: [&[u8]; 12] = [
        b"RIFF",
        &(36 + data_len).to_le_bytes(),
        b"WAVEfmt ",
        &16u32.to_le_bytes(),
        &1u16.to_le_bytes(),
        &1u16.to_le_bytes(),
        &sample_rate.to_le_bytes(),
        &(sample_rate * BYTES_PER_SAMPLE as u32).to_le_bytes(),
        &BYTES_PER_SAMPLE.to_le_bytes(),
        &(BYTES_PER_SAMPLE * 8).to_le_bytes(),
        b"data",
        &data_len.to_le_bytes(),
    ];
    let mut h = [0u8; HEADER_LEN];
    let mut pos = 0;
    for field in fields {
        h[pos..pos + field.len()].copy_from_slice(field);
        pos += field.len();
    }
    h
}
