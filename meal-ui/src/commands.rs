//! Line-oriented commands that drive a session, one per line.

use thiserror::Error;

pub const HELP: &str = "\
Perintah:
  next | lanjut          lanjut ke langkah berikutnya
  back | kembali         kembali ke langkah sebelumnya
  restart | ulang        mulai ulang dari awal (langkah hasil)
  budget <angka>         isi budget
  price <angka>          isi perkiraan harga
  province <nama|no>     pilih provinsi
  district <nama|no>     pilih kota/kabupaten
  subdistrict <nama|no>  pilih kecamatan
  click <lat> <lng>      klik peta pada koordinat
  radius <meter>         isi radius area
  day | hari <n>         tampilkan menu hari ke-n (langkah hasil)
  wait                   tunggu rekomendasi selesai dimuat
  show                   tampilkan layar saat ini
  log <level>            ubah level log (error, warn, info, debug, trace)
  help                   tampilkan bantuan ini
  quit | exit            keluar
";

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Next,
    Back,
    Restart,
    Budget(String),
    Price(String),
    Province(String),
    District(String),
    SubDistrict(String),
    Click { lat: f64, lng: f64 },
    Radius(String),
    Day(u32),
    Wait,
    Show,
    Log(String),
    Help,
    Quit,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CommandError {
    #[error("unknown command '{0}' (try 'help')")]
    Unknown(String),

    #[error("'{command}' needs {expected}")]
    MissingArgument {
        command: &'static str,
        expected: &'static str,
    },

    #[error("invalid coordinate '{0}'")]
    InvalidCoordinate(String),

    #[error("'{0}' takes no argument")]
    UnexpectedArgument(&'static str),

    #[error("invalid day '{0}'")]
    InvalidDay(String),
}

/// Parses one input line.
///
/// Blank lines and lines starting with `#` yield `Ok(None)`. The command word
/// is case-insensitive; the rest of the line is the argument, trimmed.
/// `budget`, `price` and `radius` accept an empty argument, which clears the
/// field.
pub fn parse_command(line: &str) -> Result<Option<Command>, CommandError> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return Ok(None);
    }

    let (word, rest) = match line.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (line, ""),
    };

    let command = match word.to_lowercase().as_str() {
        "next" | "lanjut" | "mulai" => no_argument("next", rest, Command::Next)?,
        "back" | "kembali" => no_argument("back", rest, Command::Back)?,
        "restart" | "ulang" => no_argument("restart", rest, Command::Restart)?,
        "wait" => no_argument("wait", rest, Command::Wait)?,
        "show" => no_argument("show", rest, Command::Show)?,
        "help" | "?" => Command::Help,
        "quit" | "exit" => no_argument("quit", rest, Command::Quit)?,
        "budget" => Command::Budget(rest.to_string()),
        "price" => Command::Price(rest.to_string()),
        "radius" => Command::Radius(rest.to_string()),
        "province" => Command::Province(required("province", "an option", rest)?),
        "district" => Command::District(required("district", "an option", rest)?),
        "subdistrict" | "sub_district" => {
            Command::SubDistrict(required("subdistrict", "an option", rest)?)
        }
        "log" => Command::Log(required("log", "a level", rest)?),
        "click" => parse_click(rest)?,
        "day" | "hari" => parse_day(required("day", "a day number", rest)?)?,
        _ => return Err(CommandError::Unknown(word.to_string())),
    };
    Ok(Some(command))
}

fn no_argument(
    command: &'static str,
    rest: &str,
    parsed: Command,
) -> Result<Command, CommandError> {
    if rest.is_empty() {
        Ok(parsed)
    } else {
        Err(CommandError::UnexpectedArgument(command))
    }
}

fn required(
    command: &'static str,
    expected: &'static str,
    rest: &str,
) -> Result<String, CommandError> {
    if rest.is_empty() {
        Err(CommandError::MissingArgument { command, expected })
    } else {
        Ok(rest.to_string())
    }
}

/// `click <lat> <lng>`; a comma between the two is accepted as well.
fn parse_click(rest: &str) -> Result<Command, CommandError> {
    let mut parts = rest
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|part| !part.is_empty());

    let (Some(lat), Some(lng), None) = (parts.next(), parts.next(), parts.next()) else {
        return Err(CommandError::MissingArgument {
            command: "click",
            expected: "<lat> <lng>",
        });
    };

    Ok(Command::Click {
        lat: parse_coordinate(lat)?,
        lng: parse_coordinate(lng)?,
    })
}

/// `day 2`, also written `hari ke-2`.
fn parse_day(arg: String) -> Result<Command, CommandError> {
    let number = arg.strip_prefix("ke-").unwrap_or(&arg).trim();
    number
        .parse::<u32>()
        .map(Command::Day)
        .map_err(|_| CommandError::InvalidDay(arg.clone()))
}

fn parse_coordinate(text: &str) -> Result<f64, CommandError> {
    text.parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
        .ok_or_else(|| CommandError::InvalidCoordinate(text.to_string()))
}
