pub mod phasing_txt;
