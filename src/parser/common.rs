use nom::{
    IResult,
    character::complete::multispace0,
    combinator::{rest, verify},
    sequence::delimited,
};

pub fn ws<'a, F, O>(inner: F) -> impl FnMut(&'a str) -> IResult<&'a str, O>
where
    F: FnMut(&'a str) -> IResult<&'a str, O>,
{
    delimited(multispace0, inner, multispace0)
}

/// Remaining input, which must not be empty
pub fn non_empty_rest(input: &str) -> IResult<&str, &str> {
    verify(rest, |s: &str| !s.is_empty())(input)
}
