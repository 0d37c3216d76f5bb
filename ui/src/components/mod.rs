pub mod newsletter;
pub mod signup;
