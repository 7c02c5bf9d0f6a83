//! Bucket-scoped filtering of X-Plane `apt.dat` airport data.
//!
//! Files are handled as raw bytes: `apt.dat` is Latin-1, and lines are copied
//! through unchanged.

use std::collections::HashSet;
use std::io::{self, BufRead, Write};

use foundation::{BucketCoord, LatLonBounds};
use tracing::{debug, warn};

/// First line of an `apt.dat` file: the line-ending marker.
pub const APT_OPENING: &[u8] = b"I";

/// Version and copyright line written under the opening marker.
pub const APT_VERSION: &[u8] = b"1200 version - Copyright \xA9 2013, Robin A. Peel (robin@x-plane.com).   \
This data is free software; you can redistribute it and/or modify it under the terms of the GNU \
General Public License as published by the Free Software Foundation; either version 2 of the \
License, or (at your option) any later version.  This program is distributed in the hope that it \
will be useful, but WITHOUT ANY WARRANTY; without even the implied warranty of MERCHANTABILITY or \
FITNESS FOR A PARTICULAR PURPOSE.  See the GNU General Public License for more details.  You should \
have received a copy of the GNU General Public License along with this program \
(\"AptNavGNULicence.txt\"); if not, write to the Free Software Foundation, Inc., 59 Temple Place, \
Suite 330, Boston, MA 02111-1307, USA.";

/// End-of-file row code.
pub const APT_END: &[u8] = b"99";

/// Row codes that start a new airport, seaplane base or heliport.
const AIRPORT_HEADERS: [&[u8]; 3] = [b"1", b"16", b"17"];

/// Version row codes accepted in the file header.
const VERSION_CODES: [&[u8]; 3] = [b"1000", b"1100", b"1200"];

/// Field index of the ICAO identifier in an airport header row.
const IDENT_FIELD: usize = 4;

/// `(lat, lon)` field indices of the positions carried by a row.
fn position_fields(row_code: &[u8]) -> &'static [(usize, usize)] {
    match row_code {
        // land runway ends
        b"100" => &[(9, 10), (18, 19)],
        // water runway ends
        b"101" => &[(4, 5), (7, 8)],
        // helipad
        b"102" => &[(2, 3)],
        // pavement and linear feature nodes
        b"111" | b"112" | b"113" | b"114" | b"115" | b"116" => &[(1, 2)],
        // viewpoint, startup location, windsock, sign, lighting, taxi node, ramp
        b"14" | b"15" | b"18" | b"19" | b"20" | b"21" | b"1201" | b"1300" => &[(1, 2)],
        _ => &[],
    }
}

struct PendingAirport {
    ident: Vec<u8>,
    lines: Vec<u8>,
    in_bounds: bool,
}

/// Keeps the airports that have at least one runway end, helipad, node or
/// position inside a bucket. Airports already written are remembered, so an
/// airport listed again in a later input is dropped.
pub struct AirportFilter {
    bounds: LatLonBounds,
    seen: HashSet<Vec<u8>>,
}

impl AirportFilter {
    pub fn new(bucket: BucketCoord) -> Self {
        Self {
            bounds: bucket.bounds(),
            seen: HashSet::new(),
        }
    }

    /// Number of distinct airports written so far.
    pub fn airports_written(&self) -> usize {
        self.seen.len()
    }

    /// Copies the matching airports of one `apt.dat` stream to `output`.
    /// The stream's own header and `99` terminator are not copied.
    pub fn filter<R, W>(&mut self, mut input: R, output: &mut W) -> io::Result<usize>
    where
        R: BufRead,
        W: Write,
    {
        let mut written = 0;
        let mut current: Option<PendingAirport> = None;
        let mut line = Vec::new();
        let mut line_no = 0usize;

        loop {
            line.clear();
            if input.read_until(b'\n', &mut line)? == 0 {
                break;
            }
            let index = line_no;
            line_no += 1;

            let mut fields = line
                .split(|b| b.is_ascii_whitespace())
                .filter(|field| !field.is_empty());
            let Some(code) = fields.next() else {
                continue;
            };

            if index == 0 && (code == b"I" || code == b"A") {
                continue;
            }
            if index <= 2 && VERSION_CODES.contains(&code) {
                continue;
            }
            if code == APT_END {
                continue;
            }

            if AIRPORT_HEADERS.contains(&code) {
                if let Some(done) = current.take() {
                    written += self.flush(done, output)?;
                }
                let Some(ident) = line
                    .split(|b| b.is_ascii_whitespace())
                    .filter(|field| !field.is_empty())
                    .nth(IDENT_FIELD)
                else {
                    warn!("airport header without identifier on line {}", index + 1);
                    continue;
                };
                current = Some(PendingAirport {
                    ident: ident.to_vec(),
                    lines: Vec::new(),
                    in_bounds: false,
                });
            }

            // Rows before the first airport header belong to no airport.
            let Some(airport) = current.as_mut() else {
                continue;
            };
            if !airport.in_bounds {
                airport.in_bounds = self.row_in_bounds(code, &line, index);
            }
            airport.lines.extend_from_slice(&line);
            if !line.ends_with(b"\n") {
                airport.lines.push(b'\n');
            }
        }

        if let Some(done) = current.take() {
            written += self.flush(done, output)?;
        }
        Ok(written)
    }

    fn row_in_bounds(&self, code: &[u8], line: &[u8], index: usize) -> bool {
        let positions = position_fields(code);
        if positions.is_empty() {
            return false;
        }
        let fields: Vec<&[u8]> = line
            .split(|b| b.is_ascii_whitespace())
            .filter(|field| !field.is_empty())
            .collect();
        positions.iter().any(|&(lat_at, lon_at)| {
            match (coordinate(&fields, lat_at), coordinate(&fields, lon_at)) {
                (Some(lat), Some(lon)) => self.bounds.contains(lat, lon),
                _ => {
                    warn!("unreadable position on line {}", index + 1);
                    false
                }
            }
        })
    }

    fn flush<W: Write>(&mut self, airport: PendingAirport, output: &mut W) -> io::Result<usize> {
        if !airport.in_bounds {
            return Ok(0);
        }
        if self.seen.contains(&airport.ident) {
            debug!(
                "dropping repeated airport {}",
                String::from_utf8_lossy(&airport.ident)
            );
            return Ok(0);
        }
        output.write_all(&airport.lines)?;
        self.seen.insert(airport.ident);
        Ok(1)
    }
}

fn coordinate(fields: &[&[u8]], at: usize) -> Option<f64> {
    let raw = std::str::from_utf8(fields.get(at)?).ok()?;
    raw.parse().ok()
}

/// Writes the `I` marker and the version line.
pub fn write_apt_header<W: Write>(output: &mut W) -> io::Result<()> {
    output.write_all(APT_OPENING)?;
    output.write_all(b"\n")?;
    output.write_all(APT_VERSION)?;
    output.write_all(b"\n")
}

pub fn write_apt_footer<W: Write>(output: &mut W) -> io::Result<()> {
    output.write_all(APT_END)?;
    output.write_all(b"\n")
}

/// Complete `apt.dat` for `bucket` built from several inputs.
pub fn filter_airports<R, I, W>(bucket: BucketCoord, inputs: I, output: &mut W) -> io::Result<usize>
where
    R: BufRead,
    I: IntoIterator<Item = R>,
    W: Write,
{
    let mut filter = AirportFilter::new(bucket);
    write_apt_header(output)?;
    for input in inputs {
        filter.filter(input, output)?;
    }
    write_apt_footer(output)?;
    Ok(filter.airports_written())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const W080N40: BucketCoord = BucketCoord::new(40, -80);

    // KJFK sits inside w080n40, EGLL does not.
    const SAMPLE: &str = "I
1100 Generated by WorldEditor

1     13 0 0 KJFK John F Kennedy Intl
100   60.96   1   0 0.25 0 2 1 04L  40.62202000 -073.78561000  0.00    0.00 2  0 0 0 22R  40.64249000 -073.76826000  0.00    0.00 2  0 0 0
1302 city New York
1      83 0 0 EGLL London Heathrow
100   50.00   1   0 0.25 0 2 1 09L  51.47750000 -000.48500000  0.00    0.00 2  0 0 0 27R  51.47750000 -000.43330000  0.00    0.00 2  0 0 0
99
";

    fn run(inputs: &[&str]) -> String {
        let mut out = Vec::new();
        filter_airports(W080N40, inputs.iter().map(|s| s.as_bytes()), &mut out).unwrap();
        String::from_utf8_lossy(&out).into_owned()
    }

    fn body(output: &str) -> Vec<&str> {
        let lines: Vec<&str> = output.lines().collect();
        assert_eq!(lines[0], "I");
        assert!(lines[1].starts_with("1200 version - Copyright"));
        assert_eq!(lines[lines.len() - 1], "99");
        lines[2..lines.len() - 1].to_vec()
    }

    #[test]
    fn keeps_only_airports_inside_the_bucket() {
        let out = run(&[SAMPLE]);
        let body = body(&out);
        assert_eq!(body.len(), 3);
        assert!(body[0].contains("KJFK"));
        assert!(body[1].starts_with("100 "));
        assert_eq!(body[2], "1302 city New York");
        assert!(!out.contains("EGLL"));
    }

    #[test]
    fn last_airport_is_checked_against_bounds() {
        let reversed = "1      83 0 0 EGLL London Heathrow
100   50.00   1   0 0.25 0 2 1 09L  51.47750000 -000.48500000  0.00    0.00 2  0 0 0 27R  51.47750000 -000.43330000  0.00    0.00 2  0 0 0
";
        let mut filter = AirportFilter::new(W080N40);
        let mut out = Vec::new();
        assert_eq!(filter.filter(reversed.as_bytes(), &mut out).unwrap(), 0);
        assert!(out.is_empty());
    }

    #[test]
    fn airports_repeated_across_inputs_are_written_once() {
        let mut out = Vec::new();
        let count = filter_airports(
            W080N40,
            [SAMPLE.as_bytes(), SAMPLE.as_bytes()],
            &mut out,
        )
        .unwrap();
        assert_eq!(count, 1);
        let out = String::from_utf8_lossy(&out);
        assert_eq!(out.matches("KJFK").count(), 1);
    }

    #[test]
    fn any_position_row_puts_an_airport_in_bounds() {
        let helipad_only = "1      1000 0 0 PA01 Heliport
102 H1 40.50000000 -079.50000000 0.00 10.00 10.00 1 0 0 0.00 0
1      1000 0 0 PA02 Seaplane base
101 49.00 1 08 35.00000000 -079.00000000 26 45.50000000 -078.90000000
1      1000 0 0 PA03 Ramp only
1300 41.00000000 -075.00000000 90.00 misc jets|turboprops Ramp 1
";
        let out = run(&[helipad_only]);
        let body = body(&out);
        assert!(body.iter().any(|l| l.contains("PA01")));
        assert!(body.iter().any(|l| l.contains("PA02")));
        assert!(body.iter().any(|l| l.contains("PA03")));
    }

    #[test]
    fn bucket_edges_are_inclusive() {
        let edge = "1      1000 0 0 EDGE Corner
1300 50.00000000 -070.00000000 0.0 misc jets Ramp
";
        assert!(run(&[edge]).contains("EDGE"));
    }

    #[test]
    fn header_is_latin1() {
        let mut out = Vec::new();
        write_apt_header(&mut out).unwrap();
        assert!(out.starts_with(b"I\n1200 version - Copyright \xA9 2013"));
        assert!(out.ends_with(b"USA.\n"));
    }

    #[test]
    fn latin1_lines_pass_through_unchanged() {
        let mut input = b"1      1000 0 0 SBGR Guarulhos S\xE3o Paulo\n".to_vec();
        input.extend_from_slice(b"1300 45.00000000 -075.00000000 0.0 misc jets Ramp\n");
        let mut filter = AirportFilter::new(W080N40);
        let mut out = Vec::new();
        filter.filter(input.as_slice(), &mut out).unwrap();
        assert_eq!(out, input);
    }

    #[test]
    fn unreadable_positions_do_not_match() {
        let broken = "1      1000 0 0 BAD1 Broken
1300 north west 0.0 misc jets Ramp
100 short
";
        let mut filter = AirportFilter::new(W080N40);
        let mut out = Vec::new();
        assert_eq!(filter.filter(broken.as_bytes(), &mut out).unwrap(), 0);
    }
}
