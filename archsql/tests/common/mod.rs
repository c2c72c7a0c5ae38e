//! Reads back the `CREATE TABLE` scripts written by archsql.

use nom::branch::alt;
use nom::bytes::complete::{tag, tag_no_case, take_while1};
use nom::character::complete::{line_ending, multispace0, multispace1, none_of, not_line_ending};
use nom::combinator::{eof, map, opt, value};
use nom::error::{context, VerboseError};
use nom::multi::{fold_many0, many0, separated_list1};
use nom::sequence::{delimited, preceded, terminated, tuple};
use nom::Finish;

type IResult<I, O> = nom::IResult<I, O, VerboseError<I>>;

#[derive(Clone, Debug, PartialEq)]
pub struct CreateTable {
    pub name: String,
    pub columns: Vec<Column>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Column {
    pub name: String,
    pub datatype: String,
    pub primary_key: bool,
    pub not_null: bool,
    pub references: Option<(String, String)>,
}

impl CreateTable {
    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|column| column.name == name)
    }
}

/// Parses a whole script, panicking with the nom trace on failure.
pub fn parse_script(input: &str) -> Vec<CreateTable> {
    match script(input).finish() {
        Ok((_, tables)) => tables,
        Err(err) => panic!("{}", nom::error::convert_error(input, err)),
    }
}

fn script(i: &str) -> IResult<&str, Vec<CreateTable>> {
    context(
        "script",
        terminated(
            preceded(many0(comment), many0(create)),
            preceded(multispace0, eof),
        ),
    )(i)
}

fn comment(i: &str) -> IResult<&str, &str> {
    delimited(tag("--"), not_line_ending, line_ending)(i)
}

fn create(i: &str) -> IResult<&str, CreateTable> {
    context(
        "create",
        map(
            tuple((
                preceded(multispace0, tag_no_case("CREATE")),
                preceded(multispace1, tag_no_case("TABLE")),
                preceded(multispace1, identifier),
                delimited(
                    space_open_paren,
                    separated_list1(space_comma, column),
                    space_close_paren,
                ),
                tag(";"),
            )),
            |(_, _, name, columns, _)| CreateTable { name, columns },
        ),
    )(i)
}

fn column(i: &str) -> IResult<&str, Column> {
    context(
        "column",
        map(
            tuple((
                preceded(multispace0, identifier),
                preceded(multispace1, datatype),
                opt(preceded(multispace1, not_null)),
                opt(preceded(multispace1, primary_key)),
                opt(preceded(multispace1, references)),
            )),
            |(name, datatype, not_null, primary, references)| Column {
                name,
                datatype: datatype.to_string(),
                primary_key: primary.is_some(),
                not_null: not_null.is_some(),
                references,
            },
        ),
    )(i)
}

fn datatype(i: &str) -> IResult<&str, &str> {
    alt((
        tag_no_case("INTEGER"),
        tag_no_case("TEXT"),
        tag_no_case("BLOB"),
        tag_no_case("REAL"),
        tag_no_case("NULL"),
    ))(i)
}

fn not_null(i: &str) -> IResult<&str, &str> {
    preceded(tuple((tag_no_case("NOT"), multispace1)), tag_no_case("NULL"))(i)
}

fn primary_key(i: &str) -> IResult<&str, &str> {
    preceded(tuple((tag_no_case("PRIMARY"), multispace1)), tag_no_case("KEY"))(i)
}

fn references(i: &str) -> IResult<&str, (String, String)> {
    map(
        tuple((
            tag_no_case("REFERENCES"),
            preceded(multispace1, identifier),
            delimited(space_open_paren, identifier, space_close_paren),
        )),
        |(_, table, column)| (table, column),
    )(i)
}

fn identifier(i: &str) -> IResult<&str, String> {
    context(
        "identifier",
        alt((
            map(take_while1(|c: char| c.is_alphanumeric() || c == '_'), str::to_string),
            quoted_identifier,
        )),
    )(i)
}

/// `"..."` with `""` standing for one quote.
fn quoted_identifier(i: &str) -> IResult<&str, String> {
    delimited(
        tag("\""),
        fold_many0(
            alt((value('"', tag("\"\"")), none_of("\""))),
            String::new,
            |mut name, c| {
                name.push(c);
                name
            },
        ),
        tag("\""),
    )(i)
}

fn space_comma(i: &str) -> IResult<&str, &str> {
    delimited(multispace0, tag(","), multispace0)(i)
}

fn space_open_paren(i: &str) -> IResult<&str, &str> {
    delimited(multispace0, tag("("), multispace0)(i)
}

fn space_close_paren(i: &str) -> IResult<&str, &str> {
    delimited(multispace0, tag(")"), multispace0)(i)
}
