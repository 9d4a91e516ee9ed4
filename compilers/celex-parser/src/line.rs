use nom::{
    bytes::complete::take_while,
    character::complete::char,
    multi::separated_list0,
    IResult,
};

use celex_protocol::{Repeat, Schema};

use crate::error::DecodeError;
use crate::raw::{zip_fields, RawRecord};

/// Field separator. It never occurs inside field content and has no escape.
pub const DELIMITER: char = '\\';

fn fields(input: &str) -> IResult<&str, Vec<&str>> {
    separated_list0(char(DELIMITER), take_while(|c| c != DELIMITER))(input)
}

/// Splits a line into its flat fields, keeping empty ones.
pub fn split_fields(line: &str) -> Vec<&str> {
    // The field parser accepts any input, including the empty line.
    match fields(line) {
        Ok((_, fields)) => fields,
        Err(_) => vec![line],
    }
}

/// Number of repeat groups a line carries for a declared count: a count of
/// zero still carries one group, and anything above the cap is cut down to it.
pub fn repeat_count(raw: &str, repeat: &Repeat) -> Result<usize, DecodeError> {
    let declared: i64 = raw.parse().map_err(|_| DecodeError::MalformedNumber {
        field: repeat.count_field,
        value: raw.to_string(),
    })?;
    let cap = i64::try_from(repeat.cap).unwrap_or(i64::MAX);
    Ok(declared.clamp(1, cap.max(1)) as usize)
}

/// Decodes one line into raw base fields and, for variable layouts, the
/// repeat groups stored under the schema's reserved key.
pub fn decode_line<'a>(line: &'a str, schema: &Schema) -> Result<RawRecord<'a>, DecodeError> {
    let fields = split_fields(line);
    let base_len = schema.base.len();
    let mismatch = |expected: usize| DecodeError::SchemaMismatch {
        variant: schema.tag,
        expected,
        actual: fields.len(),
    };

    let Some(repeat) = &schema.repeat else {
        if fields.len() != base_len {
            return Err(mismatch(base_len));
        }
        return Ok(RawRecord::new(zip_fields(&schema.base, &fields)));
    };

    let unit_len = repeat.unit.len();
    if fields.len() < base_len {
        return Err(mismatch(base_len + unit_len));
    }
    let count_at = schema.count_position().ok_or(DecodeError::MissingField {
        record: schema.record,
        field: repeat.count_field,
    })?;
    let groups = repeat_count(fields[count_at], repeat)?;

    let expected = base_len + groups * unit_len;
    if fields.len() != expected {
        return Err(mismatch(expected));
    }

    let mut record = RawRecord::new(zip_fields(&schema.base, &fields[..base_len]));
    let members = (0..groups)
        .map(|group| {
            let start = base_len + group * unit_len;
            zip_fields(&repeat.unit, &fields[start..start + unit_len])
        })
        .collect();
    record.groups.insert(repeat.key, members);
    Ok(record)
}
