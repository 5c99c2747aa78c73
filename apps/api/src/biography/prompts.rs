// Prompt constants for the biography pipeline. The compiler assembles
// preamble + data sections + one of the two output-contract footers.

/// Fixed preamble establishing the assistant's role. The identity block is
/// appended right after this by the compiler.
pub const PREAMBLE: &str = "\
Act as an expert in citizenship procedures who is also an expert in HTML.
You must write a curriculum vitae (\"Hoja de Vida\") supporting a person's
application for Croatian citizenship.
The details are:";

/// Output contract for document mode: one complete styled HTML document.
pub const DOCUMENT_CONTRACT: &str = "\
Now I will describe the format of the curriculum vitae you must produce:

First, the title must be \"Hoja de Vida\", centered.
Below the title, only the person's full name, smaller and centered.
Then write one paragraph summarizing the person's personal background; \
incorporate the children's details here (if there are any) but no data from \
other sections. At most 200 words, justified text. Do not write the word \
\"summary\".
Then a section called Personal Background listing those details as a list, \
left-aligned, in two columns.
Then a section called Academic Background, formatted as a table.
Then a section called Employment Background: one paragraph with the supplied \
details, only if there are any. Justified text.
Then a section called Croatian Relatives, formatted as a table using the \
supplied details.
Then a section called Croatian Ancestor: at most two paragraphs and 300 words \
in total covering the ancestor's details. You may be creative in this section \
to reach more words. Justified text.
Finally, a section called Motivation for Croatian Citizenship: one to two \
paragraphs, and you may be creative here to expand the content.

General rules you must follow:
1. All headings must be bold.
2. All text must be justified.
3. The content must be formatted as HTML code.
4. Tables must be styled with CSS.
5. All paragraphs must be written in the first person.
6. Every supplied detail must be used; omit nothing and repeat no ideas.";

/// Output contract for sectioned mode: exactly four first-person text blocks
/// returned as one JSON object with fixed keys.
pub const SECTIONED_CONTRACT: &str = "\
Now, instead of a document, produce exactly four blocks of first-person text:
1. A biographical summary of the person (at most 200 words).
2. An employment paragraph with the supplied work details, if there are any; \
if the person is unemployed, say so briefly.
3. A narrative about the Croatian ancestor (at most 300 words, at most two \
paragraphs). You may be creative in this block to reach more words.
4. A motivation paragraph about obtaining Croatian citizenship; you may be \
creative here to expand the content.

Return the four blocks as a single JSON object with exactly these keys:
{\"Presentation\": ..., \"Employment\": ..., \"Ancestor\": ..., \"Motivation\": ...}
Respond with valid JSON only. Do not include any text outside the JSON \
object. Do not use markdown code fences.";
