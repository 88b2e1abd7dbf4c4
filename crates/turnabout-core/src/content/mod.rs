//! Built-in speech used when no text is supplied.

pub const SAMPLE_TITLE: &str = "Address to the Senate";

/// Default speech with enough sentences for several turns and a protected
/// closing section.
pub const SAMPLE_SPEECH: &str = "Conscript fathers, lend me your ears and, if you can spare \
them, your patience. I rise today on a matter of grave importance to the Republic. The \
aqueduct on the Aventine has sprung a leak, and the plebs are bathing in the street. Some of \
you will say this is a small thing. I say to you that Carthage was not burned in a day, nor \
was it flooded in one. Consider the fountains of our fathers! They flowed with purpose, with \
dignity, with only a modest amount of moss. Now they gurgle like a drunk legionary after the \
Saturnalia. Who profits from this neglect? Not the citizen, who must queue for water behind a \
goat. Not the goat, who did not ask to be involved. Only the contractor Gaius Sloppius, whose \
bid was suspiciously low and whose pipes are suspiciously made of cheese. I have seen the \
ledgers; I have tasted the pipes. Therefore I propose a commission of seven honest men, or \
failing that, three moderately honest men and a reliable dog. In conclusion, senators, fix the \
aqueduct before the Tiber fixes it for us. Vote wisely, vote quickly, and for the love of Jupiter, \
bring a bucket.";
